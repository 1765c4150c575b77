use std::fmt;
use thiserror::Error as ThisError;

///
/// CoreError
///
/// Structured error with a stable classification.
/// Every failure raised by the value, key, and index layers lands here; no
/// partially-built value, buffer, or key set is returned alongside it.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct CoreError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl CoreError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a validation failure for a value that violates its descriptor.
    pub(crate) fn validation(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Validation, origin, message)
    }

    /// Construct a type-mismatch failure for a cast or comparison.
    pub(crate) fn type_mismatch(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::TypeMismatch, origin, message)
    }

    /// Construct an index-constraint failure (typed JSON coercion rejected).
    pub(crate) fn index_constraint(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::IndexConstraint, ErrorOrigin::Index, message)
    }

    /// Construct an index-definition failure.
    pub(crate) fn index_definition(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Definition, ErrorOrigin::Index, message)
    }

    /// Construct an encoding-unsupported failure.
    pub(crate) fn encoding_unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::EncodingUnsupported, ErrorOrigin::Encode, message)
    }

    /// Construct a decode-origin corruption error.
    pub(crate) fn decode_corruption(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Corruption, ErrorOrigin::Decode, message)
    }

    /// Construct a table-origin not-found error.
    pub(crate) fn table_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::NotFound, ErrorOrigin::Table, message)
    }

    /// Kind-vs-kind mismatch with a uniform message shape.
    pub(crate) fn kind_mismatch(
        origin: ErrorOrigin,
        operation: &str,
        expected: impl fmt::Display,
        found: impl fmt::Display,
    ) -> Self {
        Self::type_mismatch(
            origin,
            format!("{operation}: expected {expected}, found {found}"),
        )
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self.class, ErrorClass::Validation)
    }

    #[must_use]
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self.class, ErrorClass::TypeMismatch)
    }

    #[must_use]
    pub const fn is_index_constraint(&self) -> bool {
        matches!(self.class, ErrorClass::IndexConstraint)
    }

    #[must_use]
    pub const fn is_encoding_unsupported(&self) -> bool {
        matches!(self.class, ErrorClass::EncodingUnsupported)
    }

    #[must_use]
    pub const fn is_definition(&self) -> bool {
        matches!(self.class, ErrorClass::Definition)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }

    /// Prefix the message with extra context, keeping the classification.
    #[must_use]
    pub fn context(mut self, context: impl fmt::Display) -> Self {
        self.message = format!("{context}: {}", self.message);
        self
    }
}

///
/// ErrorClass
/// Error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// Value violates its descriptor (range, length, nullability, symbol, instant).
    Validation,
    /// Cast or comparison between incompatible concrete kinds.
    TypeMismatch,
    /// Typed JSON index coercion failed for a row.
    IndexConstraint,
    /// Attempt to sortable-encode a kind with no order-preserving scheme.
    /// A contract defect in the caller, not a recoverable data condition.
    EncodingUnsupported,
    /// Index or table definition rejected against the schema.
    Definition,
    /// Encoded bytes are malformed.
    Corruption,
    NotFound,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Validation => "validation",
            Self::TypeMismatch => "type_mismatch",
            Self::IndexConstraint => "index_constraint",
            Self::EncodingUnsupported => "encoding_unsupported",
            Self::Definition => "definition",
            Self::Corruption => "corruption",
            Self::NotFound => "not_found",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Descriptor,
    Value,
    Cast,
    Compare,
    Encode,
    Decode,
    Index,
    Row,
    Table,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Descriptor => "descriptor",
            Self::Value => "value",
            Self::Cast => "cast",
            Self::Compare => "compare",
            Self::Encode => "encode",
            Self::Decode => "decode",
            Self::Index => "index",
            Self::Row => "row",
            Self::Table => "table",
        };
        write!(f, "{label}")
    }
}
