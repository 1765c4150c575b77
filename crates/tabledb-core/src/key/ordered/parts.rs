use crate::key::ordered::OrderedDecodeError;

// Byte strings are escaped so tuple boundaries remain unambiguous.
// Segment size bounds for these terminated payloads are enforced by the
// outer index-key component cap, not at this primitive layer.
pub(super) fn push_terminated_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    for &byte in bytes {
        if byte == 0 {
            out.extend_from_slice(&[0, 0xFF]);
        } else {
            out.push(byte);
        }
    }

    out.extend_from_slice(&[0, 0]);
}

// Inverse of `push_terminated_bytes`; advances `input` past the terminator.
pub(super) fn take_terminated_bytes(input: &mut &[u8]) -> Result<Vec<u8>, OrderedDecodeError> {
    let mut out = Vec::new();
    let mut index = 0;

    loop {
        let Some(&byte) = input.get(index) else {
            return Err(OrderedDecodeError::Truncated { needed: 2 });
        };
        if byte != 0 {
            out.push(byte);
            index += 1;
            continue;
        }

        match input.get(index + 1) {
            Some(0) => {
                *input = &input[index + 2..];
                return Ok(out);
            }
            Some(0xFF) => {
                out.push(0);
                index += 2;
            }
            Some(_) => return Err(OrderedDecodeError::InvalidEscape),
            None => return Err(OrderedDecodeError::Truncated { needed: 1 }),
        }
    }
}

pub(super) fn push_inverted(out: &mut Vec<u8>, bytes: &[u8]) {
    for &byte in bytes {
        out.push(!byte);
    }
}

pub(super) fn take_array<const N: usize>(input: &mut &[u8]) -> Result<[u8; N], OrderedDecodeError> {
    let bytes = take_slice(input, N)?;
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);

    Ok(out)
}

pub(super) fn take_slice<'a>(input: &mut &'a [u8], len: usize) -> Result<&'a [u8], OrderedDecodeError> {
    if input.len() < len {
        return Err(OrderedDecodeError::Truncated {
            needed: len - input.len(),
        });
    }
    let (head, tail) = input.split_at(len);
    *input = tail;

    Ok(head)
}

pub(super) fn take_byte(input: &mut &[u8]) -> Result<u8, OrderedDecodeError> {
    take_array::<1>(input).map(|[byte]| byte)
}
