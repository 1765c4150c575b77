use crate::value::Value;

///
/// ValueTag
///
/// Stable leading byte of every sortable key component.
///
/// IMPORTANT:
/// Tag values are part of the persisted key format and must remain fixed.
/// The sentinel tags sort after every value tag, in the order
/// `Empty < JsonNull < Null`, which is what puts "no value" keys after all
/// real values in an index scan.
///
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ValueTag {
    Integer = 0x10,
    Long = 0x11,
    Float = 0x12,
    Double = 0x13,
    Number = 0x14,
    String = 0x20,
    Enum = 0x28,
    Boolean = 0x30,
    Timestamp = 0x40,
    FixedBinary = 0x50,
    Binary = 0x51,
    Array = 0x60,
    Map = 0x61,
    Record = 0x62,
    Empty = 0xFC,
    JsonNull = 0xFD,
    Null = 0xFE,
    Absent = 0xFF,
}

impl ValueTag {
    /// Stable byte tag for this variant.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Inverse of [`to_u8`](Self::to_u8) for tags that may appear in keys.
    #[must_use]
    pub const fn from_u8(byte: u8) -> Option<Self> {
        Some(match byte {
            0x10 => Self::Integer,
            0x11 => Self::Long,
            0x12 => Self::Float,
            0x13 => Self::Double,
            0x14 => Self::Number,
            0x20 => Self::String,
            0x28 => Self::Enum,
            0x30 => Self::Boolean,
            0x40 => Self::Timestamp,
            0x50 => Self::FixedBinary,
            0xFC => Self::Empty,
            0xFD => Self::JsonNull,
            0xFE => Self::Null,
            _ => return None,
        })
    }

    /// Stable human-readable value kind label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Long => "LONG",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Number => "NUMBER",
            Self::String => "STRING",
            Self::Enum => "ENUM",
            Self::Boolean => "BOOLEAN",
            Self::Timestamp => "TIMESTAMP",
            Self::FixedBinary => "FIXED_BINARY",
            Self::Binary => "BINARY",
            Self::Array => "ARRAY",
            Self::Map => "MAP",
            Self::Record => "RECORD",
            Self::Empty => "EMPTY",
            Self::JsonNull => "JSON_NULL",
            Self::Null => "SQL_NULL",
            Self::Absent => "ABSENT",
        }
    }

    #[must_use]
    pub const fn is_sentinel(self) -> bool {
        matches!(self, Self::Empty | Self::JsonNull | Self::Null | Self::Absent)
    }
}

/// Stable canonical variant tag.
#[must_use]
pub(super) const fn canonical_tag(value: &Value) -> ValueTag {
    match value {
        Value::Integer(_) => ValueTag::Integer,
        Value::Long(_) => ValueTag::Long,
        Value::Float(_) => ValueTag::Float,
        Value::Double(_) => ValueTag::Double,
        Value::Number(_) => ValueTag::Number,
        Value::String(_) => ValueTag::String,
        Value::Enum(_) => ValueTag::Enum,
        Value::Boolean(_) => ValueTag::Boolean,
        Value::Timestamp(_) => ValueTag::Timestamp,
        Value::FixedBinary(_) => ValueTag::FixedBinary,
        Value::Binary(_) => ValueTag::Binary,
        Value::Array(_) => ValueTag::Array,
        Value::Map(_) => ValueTag::Map,
        Value::Record(_) => ValueTag::Record,
        Value::Empty => ValueTag::Empty,
        Value::JsonNull => ValueTag::JsonNull,
        Value::Null => ValueTag::Null,
        Value::Absent => ValueTag::Absent,
    }
}
