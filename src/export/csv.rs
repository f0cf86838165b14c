//! CSV Export functionality
//!
//! Writes the enriched listing as a spreadsheet-compatible movements sheet.

use std::io::Write;

use crate::display::format::format_date;
use crate::error::GastosResult;
use crate::services::EnrichedRecord;

/// Column headers of the movements sheet
pub const RECORD_HEADERS: [&str; 7] = [
    "Descripción",
    "Monto",
    "Fecha",
    "Divisa",
    "Tipo_Transacción",
    "Método_Pago",
    "Categoría",
];

/// Export enriched records to CSV, one row per record
///
/// Amounts are written as plain decimals; unresolved lookups as "N/A".
pub fn export_records_csv<W: Write>(records: &[EnrichedRecord], writer: W) -> GastosResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(RECORD_HEADERS)?;

    for enriched in records {
        let record = &enriched.record;
        let amount = record.amount.to_string();
        let date = format_date(record.date);
        csv.write_record([
            record.description.as_str(),
            amount.as_str(),
            date.as_str(),
            enriched.currency.label(),
            enriched.transaction_type.label(),
            enriched.payment_method.label(),
            enriched.category.label(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}
