use crate::error::CoreError;
use thiserror::Error as ThisError;

///
/// OrderedEncodeError
///
/// Sortable-encoding failures for one `Value` component.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum OrderedEncodeError {
    #[error("value kind '{kind}' has no order-preserving encoding")]
    UnsupportedValueKind { kind: &'static str },
}

impl From<OrderedEncodeError> for CoreError {
    fn from(err: OrderedEncodeError) -> Self {
        Self::encoding_unsupported(format!("value is not sortable-encodable: {err}"))
    }
}

///
/// OrderedDecodeError
///
/// Malformed sortable-encoded bytes.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum OrderedDecodeError {
    #[error("encoded component truncated: needed {needed} more bytes")]
    Truncated { needed: usize },

    #[error("unknown component tag 0x{0:02x}")]
    UnknownTag(u8),

    #[error("component tag {found} does not match declared kind {expected}")]
    TagMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid escape sequence in terminated segment")]
    InvalidEscape,

    #[error("{0} trailing bytes after final component")]
    TrailingBytes(usize),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl From<OrderedDecodeError> for CoreError {
    fn from(err: OrderedDecodeError) -> Self {
        Self::decode_corruption(format!("sortable key decode failed: {err}"))
    }
}
