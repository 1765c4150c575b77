mod cast;
mod compare;
mod json;
mod rank;
mod tag;
mod text;


use crate::{
    error::{CoreError, ErrorOrigin},
    types::{Float32, Float64, Number, Timestamp, TimestampError},
};
use std::{cmp::Ordering, sync::Arc};
use tabledb_primitives::FieldKind;

// re-exports
pub use compare::{compare, compare_key_values};
pub use rank::canonical_rank;
pub use tag::ValueTag;

///
/// Value
///
/// One field value. Each variant carries its payload; the four sentinels
/// carry none.
///
/// Null      → SQL null: the field is known and holds no value.
/// JsonNull  → JSON `null` inside (or as) a JSON document.
/// Empty     → "no value at this path" marker; only appears in index and
///             query keys, never in stored rows.
/// Absent    → the field was never set on the row.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Value {
    Integer(i32),
    Long(i64),
    Float(Float32),
    Double(Float64),
    Number(Number),
    String(String),
    Boolean(bool),
    Binary(Vec<u8>),
    FixedBinary(Vec<u8>),
    Enum(ValueEnum),
    Timestamp(Timestamp),
    /// Ordered elements of one element type.
    Array(Vec<Self>),
    /// String-keyed entries; always sorted by key with unique keys.
    Map(Vec<(String, Self)>),
    /// Named fields in record-definition order.
    Record(Vec<(String, Self)>),
    Absent,
    Null,
    Empty,
    JsonNull,
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// Build a `Value::Array` from owned items.
    pub fn from_list<T>(items: Vec<T>) -> Self
    where
        T: Into<Self>,
    {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Build a canonical `Value::Map` from owned entries.
    ///
    /// Entries are sorted by key; duplicate keys are rejected.
    pub fn from_map<K>(entries: Vec<(K, Self)>) -> Result<Self, CoreError>
    where
        K: Into<String>,
    {
        let mut entries: Vec<(String, Self)> = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        entries.sort_by(|(left, _), (right, _)| left.cmp(right));

        if let Some(pair) = entries.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(CoreError::validation(
                ErrorOrigin::Value,
                format!("map contains duplicate key '{}'", pair[0].0),
            ));
        }

        Ok(Self::Map(entries))
    }

    /// Build a timestamp value, truncating `nanos` to `precision` digits.
    pub fn timestamp(seconds: i64, nanos: u32, precision: u8) -> Result<Self, CoreError> {
        Ok(Self::Timestamp(Timestamp::new(seconds, nanos, precision)?))
    }

    /// Build an arbitrary-precision decimal value from its text form.
    pub fn number(text: &str) -> Result<Self, CoreError> {
        let number = text
            .parse::<Number>()
            .map_err(|err| CoreError::validation(ErrorOrigin::Value, err.to_string()))?;

        Ok(Self::Number(number))
    }

    ///
    /// TYPES
    ///

    /// Concrete kind of this value; `None` for the four sentinels.
    #[must_use]
    pub const fn kind(&self) -> Option<FieldKind> {
        match self {
            Self::Integer(_) => Some(FieldKind::Integer),
            Self::Long(_) => Some(FieldKind::Long),
            Self::Float(_) => Some(FieldKind::Float),
            Self::Double(_) => Some(FieldKind::Double),
            Self::Number(_) => Some(FieldKind::Number),
            Self::String(_) => Some(FieldKind::String),
            Self::Boolean(_) => Some(FieldKind::Boolean),
            Self::Binary(_) => Some(FieldKind::Binary),
            Self::FixedBinary(_) => Some(FieldKind::FixedBinary),
            Self::Enum(_) => Some(FieldKind::Enum),
            Self::Timestamp(_) => Some(FieldKind::Timestamp),
            Self::Array(_) => Some(FieldKind::Array),
            Self::Map(_) => Some(FieldKind::Map),
            Self::Record(_) => Some(FieldKind::Record),
            Self::Absent | Self::Null | Self::Empty | Self::JsonNull => None,
        }
    }

    /// Stable label for diagnostics, covering sentinels too.
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        self.tag().label()
    }

    /// Stable canonical variant tag used by key encodings.
    #[must_use]
    pub const fn tag(&self) -> ValueTag {
        tag::canonical_tag(self)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_json_null(&self) -> bool {
        matches!(self, Self::JsonNull)
    }

    #[must_use]
    pub const fn is_empty_marker(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns true for `Absent`, `Null`, `Empty` and `JsonNull`.
    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        self.kind().is_none()
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        match self.kind() {
            Some(kind) => kind.is_numeric(),
            None => false,
        }
    }

    #[must_use]
    pub const fn is_atomic(&self) -> bool {
        match self.kind() {
            Some(kind) => kind.is_atomic(),
            None => false,
        }
    }

    ///
    /// COMPARISON
    ///

    /// Loose equality: numeric equivalence across numeric kinds, structural
    /// equality otherwise. Incomparable pairs are never loosely equal.
    #[must_use]
    pub fn loosely_equals(&self, other: &Self) -> bool {
        matches!(compare(self, other), Ok(Ordering::Equal))
    }

    ///
    /// COMPLEX ACCESS
    ///

    /// Element count of an array, map or record.
    pub fn size(&self) -> Result<usize, CoreError> {
        match self {
            Self::Array(items) => Ok(items.len()),
            Self::Map(entries) | Self::Record(entries) => Ok(entries.len()),
            other => Err(not_complex("size", other)),
        }
    }

    /// Array element by position; `None` when out of bounds.
    pub fn element(&self, index: usize) -> Result<Option<&Self>, CoreError> {
        match self {
            Self::Array(items) => Ok(items.get(index)),
            other => Err(CoreError::kind_mismatch(
                ErrorOrigin::Value,
                "element",
                ValueTag::Array.label(),
                other.kind_label(),
            )),
        }
    }

    /// Map entry by key; `None` when the key is not present.
    pub fn map_get(&self, key: &str) -> Result<Option<&Self>, CoreError> {
        match self {
            Self::Map(entries) => Ok(entries
                .binary_search_by(|(entry_key, _)| entry_key.as_str().cmp(key))
                .ok()
                .map(|index| &entries[index].1)),
            other => Err(CoreError::kind_mismatch(
                ErrorOrigin::Value,
                "map_get",
                ValueTag::Map.label(),
                other.kind_label(),
            )),
        }
    }

    /// Record field by name; `None` when the record has no such field.
    pub fn record_get(&self, name: &str) -> Result<Option<&Self>, CoreError> {
        match self {
            Self::Record(fields) => Ok(fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, value)| value)),
            other => Err(CoreError::kind_mismatch(
                ErrorOrigin::Value,
                "record_get",
                ValueTag::Record.label(),
                other.kind_label(),
            )),
        }
    }
}

fn not_complex(operation: &str, value: &Value) -> CoreError {
    CoreError::type_mismatch(
        ErrorOrigin::Value,
        format!(
            "{operation}: expected a complex value, found {}",
            value.kind_label()
        ),
    )
}

macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for! {
    bool      => Boolean,
    i8        => Integer,
    i16       => Integer,
    i32       => Integer,
    i64       => Long,
    u8        => Integer,
    u16       => Integer,
    u32       => Long,
    f32       => Float,
    f64       => Double,
    Float32   => Float,
    Float64   => Double,
    Number    => Number,
    &str      => String,
    String    => String,
    Timestamp => Timestamp,
}

impl From<Vec<Self>> for Value {
    fn from(vec: Vec<Self>) -> Self {
        Self::Array(vec)
    }
}

impl From<ValueEnum> for Value {
    fn from(value: ValueEnum) -> Self {
        Self::Enum(value)
    }
}

impl From<TimestampError> for CoreError {
    fn from(err: TimestampError) -> Self {
        Self::validation(ErrorOrigin::Value, err.to_string())
    }
}

///
/// ValueEnum
///
/// Enum value: the owning definition's symbol list plus this value's
/// position in it. The symbol text is derived from the ordinal.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ValueEnum {
    symbols: Arc<[String]>,
    ordinal: u32,
}

impl ValueEnum {
    /// Build from a symbol list and ordinal; fails when out of bounds.
    pub fn new(symbols: Arc<[String]>, ordinal: u32) -> Result<Self, CoreError> {
        let in_range = usize::try_from(ordinal).is_ok_and(|index| index < symbols.len());
        if !in_range {
            return Err(CoreError::validation(
                ErrorOrigin::Value,
                format!(
                    "enum ordinal {ordinal} out of range for {} symbols",
                    symbols.len()
                ),
            ));
        }

        Ok(Self { symbols, ordinal })
    }

    /// Build from a symbol name; fails when the symbol is not declared.
    pub fn from_symbol(symbols: Arc<[String]>, symbol: &str) -> Result<Self, CoreError> {
        let Some(index) = symbols.iter().position(|candidate| candidate == symbol) else {
            return Err(CoreError::validation(
                ErrorOrigin::Value,
                format!("'{symbol}' is not a declared enum symbol"),
            ));
        };
        let ordinal = u32::try_from(index).map_err(|_| {
            CoreError::validation(ErrorOrigin::Value, "enum symbol list is too large")
        })?;

        Ok(Self { symbols, ordinal })
    }

    #[must_use]
    pub const fn ordinal(&self) -> u32 {
        self.ordinal
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        // Ordinal is bounds-checked at construction.
        self.symbols
            .get(self.ordinal as usize)
            .map_or("", String::as_str)
    }

    #[must_use]
    pub fn symbols(&self) -> &Arc<[String]> {
        &self.symbols
    }

    /// Whether both values come from the same symbol list.
    #[must_use]
    pub fn same_definition(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.symbols, &other.symbols) || self.symbols == other.symbols
    }

    /// Next symbol in declaration order; `None` at the last symbol.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        let ordinal = self.ordinal.checked_add(1)?;
        Self::new(Arc::clone(&self.symbols), ordinal).ok()
    }
}
