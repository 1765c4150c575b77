//! Runtime data model definitions.
//!
//! Type descriptors, constraints, table and index definitions. Types in
//! `model` say *what exists*; `value`, `key`, and `index` say how values of
//! those types behave.

pub mod constraint;
pub mod descriptor;
pub mod index;
pub mod table;


pub use constraint::{Constraint, Pattern};
pub use descriptor::{EnumDef, FieldType, RecordDef, TypeDescriptor};
pub use index::{IndexField, IndexModel, JsonIndexType};
pub use table::{FieldModel, TableModel};
