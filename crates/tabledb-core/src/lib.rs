//! Core value layer for the tabledb table store: type descriptors, field
//! values, order-preserving key encoding, the cross-type comparator, and
//! index-key derivation (including typed JSON and multi-key indexes).
#![warn(unreachable_pub)]

pub mod config;
pub mod db;
pub mod error;
pub mod index;
pub mod key;
pub mod model;
pub mod row;
pub mod types;
pub mod value;

///
/// CONSTANTS
///

/// Maximum number of fields in one index definition.
pub const MAX_INDEX_FIELDS: usize = 16;

/// Maximum encoded size of one index-key component, in bytes.
pub const MAX_INDEX_COMPONENT_SIZE: usize = 4 * 1024;

/// Maximum number of index tuples one row may contribute to one index.
pub const MAX_KEYS_PER_ROW: usize = 10_000;

/// Maximum fractional-second digits of a timestamp.
pub const MAX_TIMESTAMP_PRECISION: u8 = 9;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
///

pub mod prelude {
    pub use crate::{
        error::CoreError,
        model::{
            FieldType, IndexField, IndexModel, JsonIndexType, TableModel, TypeDescriptor,
        },
        row::Row,
        value::Value,
    };
    pub use tabledb_primitives::FieldKind;
}

#[cfg(test)]
mod tests {
    use crate::{index::IndexPlan, model::TypeDescriptor, value::Value};

    const fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn shared_model_types_are_send_and_sync() {
        assert_send_sync::<Value>();
        assert_send_sync::<TypeDescriptor>();
        assert_send_sync::<IndexPlan>();
        assert_send_sync::<crate::model::TableModel>();
    }
}
