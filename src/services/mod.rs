//! Service layer for gastos
//!
//! Enrichment of raw records with their lookup descriptions, filtering of
//! the enriched listing, and the report service that combines both with the
//! aggregators.

pub mod enrichment;
pub mod filter;
pub mod lookup;
pub mod report;

pub use enrichment::{enrich, EnrichedRecord, LookupTables};
pub use filter::{apply_filters, FilterCriteria};
pub use lookup::{LookupIndex, Resolved, UNCATEGORIZED_LABEL, UNKNOWN_LABEL};
pub use report::ReportService;
