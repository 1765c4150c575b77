//! Sortable key encoding.
//!
//! Values become byte strings whose unsigned lexicographic order matches
//! value order within one kind. Components concatenate into composite
//! keys (`KeyTuple`), have a textual form for string-keyed stores, and a
//! successor function for exclusive range bounds.

pub mod ordered;

mod next;
mod string;
mod tuple;

#[cfg(test)]
mod tests;

use crate::{
    error::CoreError,
    key::ordered::{OrderedDecodeError, encode_component, take_component},
    model::TypeDescriptor,
    value::Value,
};

pub use next::next_value;
pub use string::{format_for_key, value_from_key_string};
pub use tuple::KeyTuple;

/// Encode one value as a sortable key component.
pub fn encode_value(value: &Value) -> Result<Vec<u8>, CoreError> {
    Ok(encode_component(value)?)
}

/// Decode one sortable key component of `descriptor`'s kind.
/// Every byte of `bytes` must be consumed.
pub fn decode_value(bytes: &[u8], descriptor: &TypeDescriptor) -> Result<Value, CoreError> {
    let mut input = bytes;
    let value = take_component(&mut input, descriptor)?;
    if !input.is_empty() {
        return Err(OrderedDecodeError::TrailingBytes(input.len()).into());
    }

    Ok(value)
}
