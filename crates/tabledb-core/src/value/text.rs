use crate::value::Value;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::fmt;

///
/// Display
///
/// String form accepted back by `TypeDescriptor::value_from_string`:
/// plain numbers and booleans, raw strings and enum symbols, base64 for
/// binary kinds, ISO-8601 for timestamps, and JSON text for complex values.
///

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Number(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Binary(v) | Self::FixedBinary(v) => f.write_str(&STANDARD.encode(v)),
            Self::Enum(v) => f.write_str(v.symbol()),
            Self::Timestamp(v) => write!(f, "{v}"),
            Self::Array(_) | Self::Map(_) | Self::Record(_) | Self::JsonNull => {
                f.write_str(&self.to_json_text())
            }
            Self::Null => f.write_str("NULL"),
            Self::Empty => f.write_str("EMPTY"),
            Self::Absent => f.write_str("ABSENT"),
        }
    }
}
