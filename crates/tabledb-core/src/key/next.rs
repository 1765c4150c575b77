use crate::{error::CoreError, value::Value};

/// Smallest value of the same kind that sorts strictly after `value`, for
/// turning inclusive bounds into exclusive ones.
///
/// Returns `Ok(None)` at the top of a bounded domain. Decimals have no true
/// successor; the result is one digit finer than the value's own scale, so
/// it always exists. Kinds without a key encoding are rejected.
pub fn next_value(value: &Value) -> Result<Option<Value>, CoreError> {
    let next = match value {
        Value::Integer(v) => v.checked_add(1).map(Value::Integer),
        Value::Long(v) => v.checked_add(1).map(Value::Long),
        Value::Float(v) => v.next_up().map(Value::Float),
        Value::Double(v) => v.next_up().map(Value::Double),
        Value::Number(v) => Some(Value::Number(v.next_up())),
        Value::String(v) => {
            let mut next = String::with_capacity(v.len() + 1);
            next.push_str(v);
            next.push('\0');
            Some(Value::String(next))
        }
        Value::Boolean(false) => Some(Value::Boolean(true)),
        Value::Boolean(true) => None,
        Value::Timestamp(v) => v.next_unit().map(Value::Timestamp),
        Value::Enum(v) => v.next().map(Value::Enum),
        Value::FixedBinary(v) => increment_bytes(v).map(Value::FixedBinary),
        Value::Empty => Some(Value::JsonNull),
        Value::JsonNull => Some(Value::Null),
        Value::Null => None,
        Value::Binary(_) | Value::Array(_) | Value::Map(_) | Value::Record(_) | Value::Absent => {
            return Err(CoreError::encoding_unsupported(format!(
                "{} has no successor value",
                value.kind_label()
            )));
        }
    };

    Ok(next)
}

// Big-endian increment at fixed width; `None` when every byte is 0xFF.
fn increment_bytes(bytes: &[u8]) -> Option<Vec<u8>> {
    let mut next = bytes.to_vec();
    for byte in next.iter_mut().rev() {
        if *byte == u8::MAX {
            *byte = 0;
        } else {
            *byte += 1;
            return Some(next);
        }
    }

    None
}
