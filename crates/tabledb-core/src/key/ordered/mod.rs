//! Module: key::ordered
//! Responsibility: canonical sortable bytes for one value component.
//!
//! Every component is a one-byte `ValueTag` followed by a self-delimiting
//! payload, so concatenated components compare component-wise. For two
//! values of the same kind, byte order equals `compare` order.

mod decode;
mod error;
mod number;
mod parts;
mod semantics;

use crate::value::Value;

pub use decode::{take_component, take_payload};
pub use error::{OrderedDecodeError, OrderedEncodeError};

const NEGATIVE_MARKER: u8 = 0x00;
const ZERO_MARKER: u8 = 0x01;
const POSITIVE_MARKER: u8 = 0x02;

/// Encode one component: canonical tag byte followed by its payload.
pub fn encode_component(value: &Value) -> Result<Vec<u8>, OrderedEncodeError> {
    let mut out = Vec::new();
    push_component(&mut out, value)?;

    Ok(out)
}

/// Append one tagged component to `out`.
///
/// On failure `out` is left exactly as it was.
pub fn push_component(out: &mut Vec<u8>, value: &Value) -> Result<(), OrderedEncodeError> {
    let start = out.len();
    out.push(value.tag().to_u8());

    if let Err(err) = push_payload(out, value) {
        out.truncate(start);
        return Err(err);
    }

    Ok(())
}

/// Append the tag-less, order-preserving payload of `value`.
///
/// Sentinels have an empty payload. Kinds with no order-preserving scheme
/// are rejected.
pub fn push_payload(out: &mut Vec<u8>, value: &Value) -> Result<(), OrderedEncodeError> {
    match value {
        Value::Integer(v) => out.extend_from_slice(&semantics::ordered_i32_bytes(*v)),
        Value::Long(v) => out.extend_from_slice(&semantics::ordered_i64_bytes(*v)),
        Value::Float(v) => out.extend_from_slice(&semantics::ordered_f32_bytes(v.get())),
        Value::Double(v) => out.extend_from_slice(&semantics::ordered_f64_bytes(v.get())),
        Value::Number(v) => number::push_number_payload(out, v),
        Value::String(v) => parts::push_terminated_bytes(out, v.as_bytes()),
        Value::Boolean(v) => out.push(u8::from(*v)),
        Value::Enum(v) => out.extend_from_slice(&v.ordinal().to_be_bytes()),
        Value::Timestamp(v) => {
            out.extend_from_slice(&semantics::ordered_i64_bytes(v.seconds()));
            out.extend_from_slice(&v.nanos().to_be_bytes());
        }
        // Fixed length comes from the descriptor, so raw bytes self-delimit.
        Value::FixedBinary(v) => out.extend_from_slice(v),
        // Sentinels are tag-only.
        Value::Empty | Value::JsonNull | Value::Null => {}
        Value::Binary(_)
        | Value::Array(_)
        | Value::Map(_)
        | Value::Record(_)
        | Value::Absent => {
            return Err(OrderedEncodeError::UnsupportedValueKind {
                kind: value.kind_label(),
            });
        }
    }

    Ok(())
}
