//! Index-key derivation.
//!
//! An `IndexModel` is validated against its table into an `IndexPlan`,
//! which then turns rows into key tuples: one per row for simple indexes,
//! one per container member for multi-key indexes, with JSON-typed paths
//! projected onto their declared type.

mod build;
mod key;
mod path;
mod plan;
mod project;


pub use key::IndexKey;
pub use path::{IndexPath, IndexPathError, PathStep};
pub use plan::IndexPlan;
