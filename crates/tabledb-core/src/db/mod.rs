//! In-memory table used to exercise the write and index-definition
//! contracts end to end: atomic row puts with index maintenance, deletes,
//! prefix scans, and index creation over existing rows.

mod table;

#[cfg(test)]
mod tests;

pub use table::Table;
