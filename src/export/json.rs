//! JSON Export functionality
//!
//! Exports the filtered listing and its reports as one versioned document.
//! The summary totals always cover every record.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{GastosError, GastosResult};
use crate::models::{UserId, EXPENSE_LABEL, INCOME_LABEL};
use crate::reports::{
    category_aggregate, monthly_aggregate, CategoryAggregate, MonthlyAggregate, SummaryTotals,
};
use crate::services::{apply_filters, EnrichedRecord, FilterCriteria};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A listing with every report computed over it
#[derive(Debug, Clone, Serialize)]
pub struct ReportBundle {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub generated_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub user_id: UserId,

    /// Criteria the listing was filtered with
    pub criteria: FilterCriteria,

    /// Totals over every record, whatever the criteria
    pub summary: SummaryTotals,

    pub monthly: Vec<MonthlyAggregate>,

    /// Expense and income breakdowns by category
    pub categories: Vec<CategoryAggregate>,

    pub record_count: usize,

    pub records: Vec<EnrichedRecord>,
}

impl ReportBundle {
    /// Filter `all_records` with `criteria` and compute every report
    pub fn build(
        user_id: UserId,
        criteria: FilterCriteria,
        all_records: &[EnrichedRecord],
    ) -> Self {
        let summary = SummaryTotals::compute(all_records);
        let records = apply_filters(all_records, &criteria);
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            user_id,
            criteria,
            summary,
            monthly: monthly_aggregate(&records),
            categories: vec![
                category_aggregate(&records, EXPENSE_LABEL),
                category_aggregate(&records, INCOME_LABEL),
            ],
            record_count: records.len(),
            records,
        }
    }
}

/// Export a report bundle to JSON
pub fn export_report_json<W: Write>(
    bundle: &ReportBundle,
    writer: &mut W,
    pretty: bool,
) -> GastosResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, bundle)
    } else {
        serde_json::to_writer(writer, bundle)
    }
    .map_err(|e| GastosError::Export(e.to_string()))?;

    Ok(())
}
