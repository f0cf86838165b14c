//! Storage layer for gastos
//!
//! Provides the record store and its data sources, plus JSON file helpers
//! with atomic writes for the files gastos keeps itself.

pub mod file_io;
pub mod records;
pub mod source;

pub use file_io::{read_json, read_json_required, write_json_atomic};
pub use records::{RecordStore, Snapshot};
pub use source::{DataSource, JsonDirSource, EXPENSES_RESOURCE};
