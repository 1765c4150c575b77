use crate::{
    key::ordered::{
        OrderedDecodeError,
        number::take_number_payload,
        parts::{take_array, take_byte, take_slice, take_terminated_bytes},
        semantics::{f32_from_ordered, f64_from_ordered, i32_from_ordered, i64_from_ordered},
    },
    model::{FieldType, TypeDescriptor},
    types::{Float32, Float64, Timestamp},
    value::{Value, ValueTag},
};

/// Read one tagged component of `descriptor`'s kind from the front of
/// `input`, advancing it past the component.
///
/// Sentinel tags decode to their sentinel regardless of the descriptor.
/// JSON descriptors accept any JSON-legal atomic tag.
pub fn take_component(
    input: &mut &[u8],
    descriptor: &TypeDescriptor,
) -> Result<Value, OrderedDecodeError> {
    let byte = take_byte(input)?;
    let tag = ValueTag::from_u8(byte).ok_or(OrderedDecodeError::UnknownTag(byte))?;

    match tag {
        ValueTag::Empty => return Ok(Value::Empty),
        ValueTag::JsonNull => return Ok(Value::JsonNull),
        ValueTag::Null => return Ok(Value::Null),
        _ => {}
    }

    let expected = expected_tag(descriptor.ty());
    let accepted = match expected {
        Some(expected) => expected == tag,
        None => matches!(
            tag,
            ValueTag::Integer
                | ValueTag::Long
                | ValueTag::Float
                | ValueTag::Double
                | ValueTag::Number
                | ValueTag::String
                | ValueTag::Boolean
        ),
    };
    if !accepted {
        return Err(OrderedDecodeError::TagMismatch {
            expected: expected.map_or("JSON", ValueTag::label),
            found: tag.label(),
        });
    }

    take_tagged_payload(input, tag, descriptor)
}

/// Read the tag-less payload of `descriptor`'s kind from the front of
/// `input`. JSON descriptors have no single payload kind and are rejected.
pub fn take_payload(
    input: &mut &[u8],
    descriptor: &TypeDescriptor,
) -> Result<Value, OrderedDecodeError> {
    let tag = expected_tag(descriptor.ty()).ok_or_else(|| {
        OrderedDecodeError::InvalidPayload(format!("{} has no sortable payload", descriptor.ty()))
    })?;

    take_tagged_payload(input, tag, descriptor)
}

// Tag for descriptors with exactly one payload kind; `None` for JSON.
const fn expected_tag(ty: &FieldType) -> Option<ValueTag> {
    Some(match ty {
        FieldType::Integer => ValueTag::Integer,
        FieldType::Long => ValueTag::Long,
        FieldType::Float => ValueTag::Float,
        FieldType::Double => ValueTag::Double,
        FieldType::Number => ValueTag::Number,
        FieldType::String => ValueTag::String,
        FieldType::Boolean => ValueTag::Boolean,
        FieldType::Binary => ValueTag::Binary,
        FieldType::FixedBinary { .. } => ValueTag::FixedBinary,
        FieldType::Enum(_) => ValueTag::Enum,
        FieldType::Timestamp { .. } => ValueTag::Timestamp,
        FieldType::Array(_) => ValueTag::Array,
        FieldType::Map(_) => ValueTag::Map,
        FieldType::Record(_) => ValueTag::Record,
        FieldType::Json => return None,
    })
}

fn take_tagged_payload(
    input: &mut &[u8],
    tag: ValueTag,
    descriptor: &TypeDescriptor,
) -> Result<Value, OrderedDecodeError> {
    let value = match tag {
        ValueTag::Integer => Value::Integer(i32_from_ordered(take_array(input)?)),
        ValueTag::Long => Value::Long(i64_from_ordered(take_array(input)?)),
        ValueTag::Float => Value::Float(Float32::new(f32_from_ordered(take_array(input)?))),
        ValueTag::Double => Value::Double(Float64::new(f64_from_ordered(take_array(input)?))),
        ValueTag::Number => Value::Number(take_number_payload(input)?),
        ValueTag::String => {
            let bytes = take_terminated_bytes(input)?;
            Value::String(String::from_utf8(bytes).map_err(|err| {
                OrderedDecodeError::InvalidPayload(format!("string is not UTF-8: {err}"))
            })?)
        }
        ValueTag::Boolean => match take_byte(input)? {
            0 => Value::Boolean(false),
            1 => Value::Boolean(true),
            other => {
                return Err(OrderedDecodeError::InvalidPayload(format!(
                    "boolean byte 0x{other:02x}"
                )));
            }
        },
        ValueTag::Enum => {
            let FieldType::Enum(def) = descriptor.ty() else {
                return Err(payload_kind_error(descriptor));
            };
            let ordinal = u32::from_be_bytes(take_array(input)?);
            Value::Enum(
                def.value_at(ordinal)
                    .map_err(|err| OrderedDecodeError::InvalidPayload(err.message))?,
            )
        }
        ValueTag::Timestamp => {
            let FieldType::Timestamp { precision } = descriptor.ty() else {
                return Err(payload_kind_error(descriptor));
            };
            let seconds = i64_from_ordered(take_array(input)?);
            let nanos = u32::from_be_bytes(take_array(input)?);
            let timestamp = Timestamp::new(seconds, nanos, *precision)
                .map_err(|err| OrderedDecodeError::InvalidPayload(err.to_string()))?;
            if timestamp.nanos() != nanos {
                return Err(OrderedDecodeError::InvalidPayload(format!(
                    "timestamp nanos {nanos} finer than precision {precision}"
                )));
            }
            Value::Timestamp(timestamp)
        }
        ValueTag::FixedBinary => {
            let FieldType::FixedBinary { len } = descriptor.ty() else {
                return Err(payload_kind_error(descriptor));
            };
            Value::FixedBinary(take_slice(input, *len)?.to_vec())
        }
        ValueTag::Empty => Value::Empty,
        ValueTag::JsonNull => Value::JsonNull,
        ValueTag::Null => Value::Null,
        ValueTag::Binary
        | ValueTag::Array
        | ValueTag::Map
        | ValueTag::Record
        | ValueTag::Absent => return Err(payload_kind_error(descriptor)),
    };

    Ok(value)
}

fn payload_kind_error(descriptor: &TypeDescriptor) -> OrderedDecodeError {
    OrderedDecodeError::InvalidPayload(format!("{} has no sortable payload", descriptor.ty()))
}
