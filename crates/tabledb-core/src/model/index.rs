use derive_more::Display;
use std::fmt;
use tabledb_primitives::FieldKind;

///
/// IndexModel
///
/// Declarative index definition: a name and an ordered list of field
/// paths. Field order is significant; it is the key component order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexModel {
    pub name: String,
    pub fields: Vec<IndexField>,
}

impl IndexModel {
    #[must_use]
    pub fn new(name: impl Into<String>, fields: Vec<IndexField>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Whether this index's field list is a strict prefix of another's.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        self.fields.len() < other.fields.len() && other.fields.starts_with(&self.fields)
    }
}

impl fmt::Display for IndexModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (index, field) in self.fields.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}")?;
        }
        f.write_str(")")
    }
}

///
/// IndexField
///
/// One indexed path. Paths that reach into JSON must declare the type the
/// indexed values are projected to; other paths must not.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexField {
    pub path: String,
    pub declared: Option<JsonIndexType>,
}

impl IndexField {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            declared: None,
        }
    }

    #[must_use]
    pub fn typed(path: impl Into<String>, declared: JsonIndexType) -> Self {
        Self {
            path: path.into(),
            declared: Some(declared),
        }
    }
}

impl fmt::Display for IndexField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.declared {
            Some(declared) => write!(f, "{} as {declared}", self.path),
            None => f.write_str(&self.path),
        }
    }
}

///
/// JsonIndexType
///
/// Atomic type a JSON index path projects its values to.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum JsonIndexType {
    #[display("long")]
    Long,
    #[display("double")]
    Double,
    #[display("number")]
    Number,
    #[display("string")]
    String,
    #[display("boolean")]
    Boolean,
}

impl JsonIndexType {
    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Long => FieldKind::Long,
            Self::Double => FieldKind::Double,
            Self::Number => FieldKind::Number,
            Self::String => FieldKind::String,
            Self::Boolean => FieldKind::Boolean,
        }
    }

    /// Declared type for `kind`, when `kind` is a JSON index target.
    #[must_use]
    pub const fn from_kind(kind: FieldKind) -> Option<Self> {
        if !kind.is_json_index_target() {
            return None;
        }

        match kind {
            FieldKind::Long => Some(Self::Long),
            FieldKind::Double => Some(Self::Double),
            FieldKind::Number => Some(Self::Number),
            FieldKind::String => Some(Self::String),
            FieldKind::Boolean => Some(Self::Boolean),
            _ => None,
        }
    }
}
