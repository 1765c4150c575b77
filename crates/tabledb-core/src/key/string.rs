use crate::{
    error::{CoreError, ErrorOrigin},
    key::ordered::{OrderedDecodeError, push_payload, take_payload},
    model::{FieldType, TypeDescriptor},
    value::Value,
};

/// Textual key form for string-keyed stores.
///
/// Strings are used verbatim; every other key-encodable kind is the
/// lowercase hex of its order-preserving payload, so for one kind the
/// string order matches value order.
pub fn format_for_key(value: &Value) -> Result<String, CoreError> {
    if let Value::String(text) = value {
        return Ok(text.clone());
    }
    if value.is_sentinel() {
        return Err(CoreError::encoding_unsupported(format!(
            "{} has no key-string form",
            value.kind_label()
        )));
    }

    let mut payload = Vec::new();
    push_payload(&mut payload, value)?;

    Ok(hex::encode(payload))
}

/// Inverse of [`format_for_key`] for a value of `descriptor`'s kind.
pub fn value_from_key_string(text: &str, descriptor: &TypeDescriptor) -> Result<Value, CoreError> {
    match descriptor.ty() {
        FieldType::String => return Ok(Value::String(text.to_string())),
        FieldType::Json => {
            return Err(CoreError::encoding_unsupported(
                "JSON fields have no key-string form",
            ));
        }
        _ => {}
    }

    let bytes = decode_hex(text)?;
    let mut input = bytes.as_slice();
    let value = take_payload(&mut input, descriptor)?;
    if !input.is_empty() {
        return Err(OrderedDecodeError::TrailingBytes(input.len()).into());
    }

    Ok(value)
}

fn decode_hex(text: &str) -> Result<Vec<u8>, CoreError> {
    let invalid = |reason: &dyn std::fmt::Display| {
        CoreError::validation(
            ErrorOrigin::Decode,
            format!("key string '{text}' is not lowercase hex: {reason}"),
        )
    };
    if text.bytes().any(|byte| byte.is_ascii_uppercase()) {
        return Err(invalid(&"upper-case digit"));
    }

    hex::decode(text).map_err(|err| invalid(&err))
}
