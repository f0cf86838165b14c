//! Report service
//!
//! Ties a loaded snapshot to the filter engine and the aggregators. The
//! snapshot is enriched once; every query after that works on the enriched
//! listing.

use std::sync::Arc;

use super::enrichment::{enrich, EnrichedRecord};
use super::filter::{apply_filters, FilterCriteria};
use crate::reports::{
    category_aggregate, monthly_aggregate, CategoryAggregate, MonthlyAggregate, SummaryTotals,
};
use crate::storage::Snapshot;

/// Queries over one snapshot
pub struct ReportService {
    snapshot: Arc<Snapshot>,
    enriched: Vec<EnrichedRecord>,
}

impl ReportService {
    pub fn new(snapshot: Arc<Snapshot>) -> Self {
        let enriched = enrich(&snapshot);
        Self { snapshot, enriched }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Every record, enriched, in source order
    pub fn enriched(&self) -> &[EnrichedRecord] {
        &self.enriched
    }

    /// Records matching `criteria`
    pub fn filtered(&self, criteria: &FilterCriteria) -> Vec<EnrichedRecord> {
        apply_filters(&self.enriched, criteria)
    }

    /// Totals over every record; filters never apply here
    pub fn summary(&self) -> SummaryTotals {
        SummaryTotals::compute(&self.enriched)
    }

    pub fn monthly(&self, criteria: &FilterCriteria) -> Vec<MonthlyAggregate> {
        monthly_aggregate(&self.filtered(criteria))
    }

    pub fn categories(&self, criteria: &FilterCriteria, transaction_type: &str) -> CategoryAggregate {
        category_aggregate(&self.filtered(criteria), transaction_type)
    }
}
