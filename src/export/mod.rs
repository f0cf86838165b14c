//! Export module for gastos
//!
//! Provides export of the filtered listing in multiple formats:
//! - CSV: the movements sheet (spreadsheet-compatible)
//! - JSON: listing plus every report, machine-readable
//! - YAML: the same document, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_records_csv, RECORD_HEADERS};
pub use json::{export_report_json, ReportBundle, EXPORT_SCHEMA_VERSION};
pub use yaml::export_report_yaml;
