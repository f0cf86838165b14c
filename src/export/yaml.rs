//! YAML Export functionality
//!
//! Same document as the JSON export, for reading by humans.

use std::io::Write;

use crate::error::{GastosError, GastosResult};
use crate::export::json::ReportBundle;

/// Export a report bundle to YAML format
pub fn export_report_yaml<W: Write>(bundle: &ReportBundle, writer: &mut W) -> GastosResult<()> {
    let export_err = |e: std::io::Error| GastosError::Export(e.to_string());

    // Add a header comment
    writeln!(writer, "# gastos report export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", bundle.generated_at).map_err(export_err)?;
    writeln!(writer, "# Records: {}", bundle.record_count).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, bundle).map_err(|e| GastosError::Export(e.to_string()))?;

    Ok(())
}
