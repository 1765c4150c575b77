use crate::{
    MAX_TIMESTAMP_PRECISION,
    error::{CoreError, ErrorOrigin},
    model::constraint::Constraint,
    types::{Float32, Float64, Number, Timestamp},
    value::{Value, ValueEnum},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::Value as JsonValue;
use std::{fmt, sync::Arc};
use tabledb_primitives::FieldKind;

///
/// FieldType
///
/// Shape of a declared field. Complex kinds nest full descriptors so every
/// element carries its own nullability, default, and constraint.
///

#[derive(Clone, Debug, PartialEq)]
pub enum FieldType {
    Integer,
    Long,
    Float,
    Double,
    Number,
    String,
    Boolean,
    Binary,
    FixedBinary { len: usize },
    Enum(EnumDef),
    Timestamp { precision: u8 },
    Array(Box<TypeDescriptor>),
    Map(Box<TypeDescriptor>),
    Record(RecordDef),
    Json,
}

impl FieldType {
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Integer => FieldKind::Integer,
            Self::Long => FieldKind::Long,
            Self::Float => FieldKind::Float,
            Self::Double => FieldKind::Double,
            Self::Number => FieldKind::Number,
            Self::String => FieldKind::String,
            Self::Boolean => FieldKind::Boolean,
            Self::Binary => FieldKind::Binary,
            Self::FixedBinary { .. } => FieldKind::FixedBinary,
            Self::Enum(_) => FieldKind::Enum,
            Self::Timestamp { .. } => FieldKind::Timestamp,
            Self::Array(_) => FieldKind::Array,
            Self::Map(_) => FieldKind::Map,
            Self::Record(_) => FieldKind::Record,
            Self::Json => FieldKind::Json,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FixedBinary { len } => write!(f, "FIXED_BINARY({len})"),
            Self::Enum(def) => write!(f, "ENUM({})", def.symbols.join(", ")),
            Self::Timestamp { precision } => write!(f, "TIMESTAMP({precision})"),
            Self::Array(element) => write!(f, "ARRAY({})", element.ty),
            Self::Map(element) => write!(f, "MAP({})", element.ty),
            Self::Record(def) => {
                f.write_str("RECORD(")?;
                for (index, (name, descriptor)) in def.fields.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name} {}", descriptor.ty)?;
                }
                f.write_str(")")
            }
            other => f.write_str(other.kind().label()),
        }
    }
}

///
/// EnumDef
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnumDef {
    symbols: Arc<[String]>,
}

impl EnumDef {
    pub fn new<I, S>(symbols: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
        if symbols.is_empty() {
            return Err(CoreError::validation(
                ErrorOrigin::Descriptor,
                "enum requires at least one symbol",
            ));
        }
        for (index, symbol) in symbols.iter().enumerate() {
            if symbol.is_empty() || symbols[..index].contains(symbol) {
                return Err(CoreError::validation(
                    ErrorOrigin::Descriptor,
                    format!("enum symbol '{symbol}' is empty or duplicated"),
                ));
            }
        }
        if u32::try_from(symbols.len()).is_err() {
            return Err(CoreError::validation(
                ErrorOrigin::Descriptor,
                "enum symbol list is too large",
            ));
        }

        Ok(Self {
            symbols: symbols.into(),
        })
    }

    #[must_use]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Enum value for `symbol`; fails when not declared.
    pub fn value(&self, symbol: &str) -> Result<ValueEnum, CoreError> {
        ValueEnum::from_symbol(Arc::clone(&self.symbols), symbol)
    }

    /// Enum value for `ordinal`; fails when out of range.
    pub fn value_at(&self, ordinal: u32) -> Result<ValueEnum, CoreError> {
        ValueEnum::new(Arc::clone(&self.symbols), ordinal)
    }
}

///
/// RecordDef
///
/// Ordered named fields; names are unique.
///

#[derive(Clone, Debug, PartialEq)]
pub struct RecordDef {
    fields: Vec<(String, TypeDescriptor)>,
}

impl RecordDef {
    pub fn new<S>(fields: Vec<(S, TypeDescriptor)>) -> Result<Self, CoreError>
    where
        S: Into<String>,
    {
        let fields: Vec<(String, TypeDescriptor)> = fields
            .into_iter()
            .map(|(name, descriptor)| (name.into(), descriptor))
            .collect();
        if fields.is_empty() {
            return Err(CoreError::validation(
                ErrorOrigin::Descriptor,
                "record requires at least one field",
            ));
        }
        for (index, (name, _)) in fields.iter().enumerate() {
            if name.is_empty() || fields[..index].iter().any(|(other, _)| other == name) {
                return Err(CoreError::validation(
                    ErrorOrigin::Descriptor,
                    format!("record field '{name}' is empty or duplicated"),
                ));
            }
        }

        Ok(Self { fields })
    }

    #[must_use]
    pub fn fields(&self) -> &[(String, TypeDescriptor)] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&TypeDescriptor> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, descriptor)| descriptor)
    }
}

///
/// TypeDescriptor
///
/// Declared type of a field or element: kind plus nullability, optional
/// default, and optional constraint. Immutable once built; the builder
/// methods consume and return a new descriptor.
///

#[derive(Clone, Debug, PartialEq)]
pub struct TypeDescriptor {
    ty: FieldType,
    nullable: bool,
    default: Option<Value>,
    constraint: Option<Constraint>,
}

impl TypeDescriptor {
    ///
    /// CONSTRUCTION
    ///

    #[must_use]
    pub const fn new(ty: FieldType) -> Self {
        Self {
            ty,
            nullable: false,
            default: None,
            constraint: None,
        }
    }

    #[must_use]
    pub const fn integer() -> Self {
        Self::new(FieldType::Integer)
    }

    #[must_use]
    pub const fn long() -> Self {
        Self::new(FieldType::Long)
    }

    #[must_use]
    pub const fn float() -> Self {
        Self::new(FieldType::Float)
    }

    #[must_use]
    pub const fn double() -> Self {
        Self::new(FieldType::Double)
    }

    #[must_use]
    pub const fn number() -> Self {
        Self::new(FieldType::Number)
    }

    #[must_use]
    pub const fn string() -> Self {
        Self::new(FieldType::String)
    }

    #[must_use]
    pub const fn boolean() -> Self {
        Self::new(FieldType::Boolean)
    }

    #[must_use]
    pub const fn binary() -> Self {
        Self::new(FieldType::Binary)
    }

    #[must_use]
    pub const fn fixed_binary(len: usize) -> Self {
        Self::new(FieldType::FixedBinary { len })
    }

    pub fn enumeration<I, S>(symbols: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::new(FieldType::Enum(EnumDef::new(symbols)?)))
    }

    pub fn timestamp(precision: u8) -> Result<Self, CoreError> {
        if precision > MAX_TIMESTAMP_PRECISION {
            return Err(CoreError::validation(
                ErrorOrigin::Descriptor,
                format!(
                    "timestamp precision {precision} exceeds maximum of {MAX_TIMESTAMP_PRECISION}"
                ),
            ));
        }

        Ok(Self::new(FieldType::Timestamp { precision }))
    }

    #[must_use]
    pub fn array(element: Self) -> Self {
        Self::new(FieldType::Array(Box::new(element)))
    }

    #[must_use]
    pub fn map(element: Self) -> Self {
        Self::new(FieldType::Map(Box::new(element)))
    }

    pub fn record<S>(fields: Vec<(S, Self)>) -> Result<Self, CoreError>
    where
        S: Into<String>,
    {
        Ok(Self::new(FieldType::Record(RecordDef::new(fields)?)))
    }

    #[must_use]
    pub const fn json() -> Self {
        Self::new(FieldType::Json)
    }

    #[must_use]
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Attach a default, validated against this descriptor.
    pub fn with_default(mut self, default: Value) -> Result<Self, CoreError> {
        let default = self
            .create_value(default)
            .map_err(|err| err.context("invalid default"))?;
        self.default = Some(default);

        Ok(self)
    }

    /// Attach a constraint; the existing default must still satisfy it.
    pub fn with_constraint(mut self, constraint: Constraint) -> Result<Self, CoreError> {
        if !constraint.applies_to(self.kind()) {
            return Err(CoreError::validation(
                ErrorOrigin::Descriptor,
                format!("constraint {constraint} cannot apply to {}", self.ty),
            ));
        }
        if let Some(default) = &self.default
            && !default.is_null()
        {
            constraint
                .check(default)
                .map_err(|err| err.context("invalid default"))?;
        }
        self.constraint = Some(constraint);

        Ok(self)
    }

    ///
    /// ACCESSORS
    ///

    #[must_use]
    pub const fn ty(&self) -> &FieldType {
        &self.ty
    }

    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.ty.kind()
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    #[must_use]
    pub const fn constraint(&self) -> Option<&Constraint> {
        self.constraint.as_ref()
    }

    ///
    /// VALUE CREATION
    ///

    /// Validate `raw` against this descriptor and convert it to the
    /// declared kind.
    ///
    /// Numeric input widens (or narrows exactly) into the declared numeric
    /// kind, enum symbols given as strings resolve to the enum, timestamps
    /// truncate to the declared precision, and complex values validate
    /// recursively.
    pub fn create_value(&self, raw: Value) -> Result<Value, CoreError> {
        match raw {
            Value::Null => {
                return if self.nullable {
                    Ok(Value::Null)
                } else {
                    Err(CoreError::validation(
                        ErrorOrigin::Value,
                        format!("{} is not nullable", self.ty),
                    ))
                };
            }
            Value::Absent | Value::Empty => {
                return Err(CoreError::validation(
                    ErrorOrigin::Value,
                    format!("{} is not a storable value", raw.kind_label()),
                ));
            }
            _ => {}
        }

        let value = self.convert(raw)?;
        if let Some(constraint) = &self.constraint {
            constraint.check(&value)?;
        }

        Ok(value)
    }

    fn convert(&self, raw: Value) -> Result<Value, CoreError> {
        match (&self.ty, raw) {
            (
                FieldType::Integer
                | FieldType::Long
                | FieldType::Float
                | FieldType::Double
                | FieldType::Number,
                raw,
            ) if raw.is_numeric() => raw.cast_numeric(self.kind()),
            (FieldType::String, Value::String(v)) => Ok(Value::String(v)),
            (FieldType::Boolean, Value::Boolean(v)) => Ok(Value::Boolean(v)),
            (FieldType::Binary, Value::Binary(v) | Value::FixedBinary(v)) => Ok(Value::Binary(v)),
            (FieldType::FixedBinary { len }, Value::Binary(v) | Value::FixedBinary(v)) => {
                if v.len() != *len {
                    return Err(CoreError::validation(
                        ErrorOrigin::Value,
                        format!(
                            "FIXED_BINARY({len}) requires {len} bytes, found {}",
                            v.len()
                        ),
                    ));
                }
                Ok(Value::FixedBinary(v))
            }
            (FieldType::Enum(def), Value::String(symbol)) => Ok(Value::Enum(def.value(&symbol)?)),
            (FieldType::Enum(def), Value::Enum(v)) => {
                if v.symbols()[..] != *def.symbols() {
                    return Err(self.mismatch(&Value::Enum(v)));
                }
                Ok(Value::Enum(v))
            }
            (FieldType::Timestamp { precision }, Value::Timestamp(v)) => {
                Ok(Value::Timestamp(v.with_precision(*precision)?))
            }
            (FieldType::Array(element), Value::Array(items)) => Ok(Value::Array(
                items
                    .into_iter()
                    .map(|item| element.create_value(item))
                    .collect::<Result<_, _>>()?,
            )),
            (FieldType::Map(element), Value::Map(entries)) => Value::from_map(
                entries
                    .into_iter()
                    .map(|(key, value)| Ok((key, element.create_value(value)?)))
                    .collect::<Result<Vec<_>, CoreError>>()?,
            ),
            (FieldType::Record(def), Value::Record(fields) | Value::Map(fields)) => {
                Self::create_record(def, fields)
            }
            (FieldType::Json, raw) => {
                if !raw.is_json_legal() {
                    return Err(CoreError::validation(
                        ErrorOrigin::Value,
                        format!("{} is not a legal JSON value", raw.kind_label()),
                    ));
                }
                Ok(raw)
            }
            (_, raw) => Err(self.mismatch(&raw)),
        }
    }

    fn create_record(def: &RecordDef, mut fields: Vec<(String, Value)>) -> Result<Value, CoreError> {
        if let Some((unknown, _)) = fields.iter().find(|(name, _)| def.field(name).is_none()) {
            return Err(CoreError::validation(
                ErrorOrigin::Value,
                format!("record has no field '{unknown}'"),
            ));
        }

        let mut out = Vec::with_capacity(def.fields.len());
        for (name, descriptor) in &def.fields {
            let supplied = fields
                .iter()
                .position(|(field, _)| field == name)
                .map(|index| fields.swap_remove(index).1);
            let value = match supplied {
                Some(value) => descriptor.create_value(value),
                None => descriptor.missing_value(),
            }
            .map_err(|err| err.context(format!("record field '{name}'")))?;
            out.push((name.clone(), value));
        }

        Ok(Value::Record(out))
    }

    /// Value used when a field is not supplied: the default, else SQL null
    /// when nullable, else a validation failure.
    pub(crate) fn missing_value(&self) -> Result<Value, CoreError> {
        if let Some(default) = &self.default {
            return Ok(default.clone());
        }
        if self.nullable {
            return Ok(Value::Null);
        }

        Err(CoreError::validation(
            ErrorOrigin::Value,
            format!("missing value for non-nullable {} without a default", self.ty),
        ))
    }

    fn mismatch(&self, found: &Value) -> CoreError {
        CoreError::kind_mismatch(
            ErrorOrigin::Value,
            "create_value",
            &self.ty,
            found.kind_label(),
        )
    }

    ///
    /// STRING FORM
    ///

    /// Parse the display form of a value of this descriptor.
    pub fn value_from_string(&self, text: &str) -> Result<Value, CoreError> {
        let raw = match &self.ty {
            FieldType::Integer => Value::Integer(parse_text(text, "INTEGER")?),
            FieldType::Long => Value::Long(parse_text(text, "LONG")?),
            FieldType::Float => Value::Float(Float32::new(parse_text(text, "FLOAT")?)),
            FieldType::Double => Value::Double(Float64::new(parse_text(text, "DOUBLE")?)),
            FieldType::Number => Value::Number(parse_text::<Number>(text, "NUMBER")?),
            FieldType::String => Value::String(text.to_string()),
            FieldType::Boolean => Value::Boolean(parse_text(text, "BOOLEAN")?),
            FieldType::Binary => Value::Binary(decode_base64(text)?),
            FieldType::FixedBinary { .. } => Value::FixedBinary(decode_base64(text)?),
            FieldType::Enum(def) => Value::Enum(def.value(text)?),
            FieldType::Timestamp { precision } => {
                Value::Timestamp(Timestamp::parse(text, *precision)?)
            }
            FieldType::Array(_) | FieldType::Map(_) | FieldType::Record(_) | FieldType::Json => {
                let json: JsonValue = serde_json::from_str(text).map_err(|err| {
                    CoreError::validation(ErrorOrigin::Value, format!("invalid JSON: {err}"))
                })?;
                return self.value_from_json(&json);
            }
        };

        self.create_value(raw)
    }

    /// Convert a JSON document into a value of this descriptor.
    ///
    /// Atomic kinds with no JSON counterpart (binary, enum, timestamp) are
    /// read from their string form.
    pub fn value_from_json(&self, json: &JsonValue) -> Result<Value, CoreError> {
        let raw = match (&self.ty, json) {
            (FieldType::Json, json) => Value::from_json(json)?,
            (_, JsonValue::Null) => Value::Null,
            (FieldType::Array(element), JsonValue::Array(items)) => Value::Array(
                items
                    .iter()
                    .map(|item| element.value_from_json(item))
                    .collect::<Result<_, _>>()?,
            ),
            (FieldType::Map(element), JsonValue::Object(members)) => Value::Map(
                members
                    .iter()
                    .map(|(key, value)| Ok((key.clone(), element.value_from_json(value)?)))
                    .collect::<Result<_, CoreError>>()?,
            ),
            (FieldType::Record(def), JsonValue::Object(members)) => {
                let mut fields = Vec::with_capacity(members.len());
                for (name, value) in members {
                    let descriptor = def.field(name).ok_or_else(|| {
                        CoreError::validation(
                            ErrorOrigin::Value,
                            format!("record has no field '{name}'"),
                        )
                    })?;
                    fields.push((name.clone(), descriptor.value_from_json(value)?));
                }
                Value::Record(fields)
            }
            (
                FieldType::Binary
                | FieldType::FixedBinary { .. }
                | FieldType::Enum(_)
                | FieldType::Timestamp { .. },
                JsonValue::String(text),
            ) => return self.value_from_string(text),
            (_, json) => Value::from_json(json)?,
        };

        self.create_value(raw)
    }

    /// Display form of `value` under this descriptor; JSON fields render as
    /// JSON text so that strings stay quoted.
    #[must_use]
    pub fn format_value(&self, value: &Value) -> String {
        match self.ty {
            FieldType::Json => value.to_json_text(),
            _ => value.to_string(),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ty)?;
        if !self.nullable {
            f.write_str(" NOT NULL")?;
        }
        if let Some(default) = &self.default {
            write!(f, " DEFAULT {default}")?;
        }
        if let Some(constraint) = &self.constraint {
            write!(f, " CHECK {constraint}")?;
        }

        Ok(())
    }
}

fn parse_text<T>(text: &str, label: &str) -> Result<T, CoreError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    text.trim().parse::<T>().map_err(|err| {
        CoreError::validation(
            ErrorOrigin::Value,
            format!("cannot parse '{text}' as {label}: {err}"),
        )
    })
}

fn decode_base64(text: &str) -> Result<Vec<u8>, CoreError> {
    STANDARD.decode(text.trim()).map_err(|err| {
        CoreError::validation(
            ErrorOrigin::Value,
            format!("invalid base64 binary '{text}': {err}"),
        )
    })
}
