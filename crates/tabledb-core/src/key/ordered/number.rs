//! Module: key::ordered::number
//! Responsibility: order-preserving payload for arbitrary-precision decimals.
//! Layout is sign bucket + ordered 128-bit exponent + significant digits +
//! terminator;
//! negative values are fully inverted so larger magnitudes sort first.

use crate::{
    key::ordered::{
        NEGATIVE_MARKER, OrderedDecodeError, POSITIVE_MARKER, ZERO_MARKER,
        parts::{push_inverted, take_array, take_byte},
        semantics::{i128_from_ordered, ordered_i128_bytes},
    },
    types::Number,
};

pub(super) const NUMBER_POSITIVE_TERMINATOR: u8 = 0x00;
pub(super) const NUMBER_NEGATIVE_TERMINATOR: u8 = 0xFF;

pub(super) fn push_number_payload(out: &mut Vec<u8>, value: &Number) {
    let Some(exponent) = value.exponent() else {
        out.push(ZERO_MARKER);
        return;
    };

    let exponent_bytes = ordered_i128_bytes(exponent);
    let digits = value.significand_digits();

    if value.is_negative() {
        out.push(NEGATIVE_MARKER);
        push_inverted(out, &exponent_bytes);
        push_inverted(out, &digits);
        out.push(NUMBER_NEGATIVE_TERMINATOR);
    } else {
        out.push(POSITIVE_MARKER);
        out.extend_from_slice(&exponent_bytes);
        out.extend_from_slice(&digits);
        out.push(NUMBER_POSITIVE_TERMINATOR);
    }
}

pub(super) fn take_number_payload(input: &mut &[u8]) -> Result<Number, OrderedDecodeError> {
    let negative = match take_byte(input)? {
        ZERO_MARKER => return Ok(Number::zero()),
        NEGATIVE_MARKER => true,
        POSITIVE_MARKER => false,
        other => {
            return Err(OrderedDecodeError::InvalidPayload(format!(
                "unknown number sign marker 0x{other:02x}"
            )));
        }
    };

    let mut exponent_bytes = take_array::<16>(input)?;
    if negative {
        exponent_bytes = exponent_bytes.map(|byte| !byte);
    }
    let exponent = i128_from_ordered(exponent_bytes);

    let terminator = if negative {
        NUMBER_NEGATIVE_TERMINATOR
    } else {
        NUMBER_POSITIVE_TERMINATOR
    };
    let Some(len) = input.iter().position(|&byte| byte == terminator) else {
        return Err(OrderedDecodeError::Truncated { needed: 1 });
    };
    let digits: Vec<u8> = input[..len]
        .iter()
        .map(|&byte| if negative { !byte } else { byte })
        .collect();
    *input = &input[len + 1..];

    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) || digits[0] == b'0' {
        return Err(OrderedDecodeError::InvalidPayload(
            "number significand is not a normalized digit string".to_string(),
        ));
    }

    Number::from_digits(negative, &digits, exponent)
        .map_err(|err| OrderedDecodeError::InvalidPayload(err.to_string()))
}
