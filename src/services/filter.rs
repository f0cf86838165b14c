//! Filter engine
//!
//! Narrows an enriched listing by optional criteria. Every criterion that is
//! set must hold for a record to pass.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enrichment::EnrichedRecord;
use crate::models::{CategoryId, Money, PaymentMethodId, TransactionTypeId};

/// Criteria for narrowing a listing; `None` means no constraint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_contains: Option<String>,

    /// Inclusive lower bound on the amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_min: Option<Money>,

    /// Inclusive upper bound on the amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_max: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type_id: Option<TransactionTypeId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<PaymentMethodId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

impl FilterCriteria {
    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.description_needle().is_none()
            && self.amount_min.is_none()
            && self.amount_max.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
            && self.transaction_type_id.is_none()
            && self.payment_method_id.is_none()
            && self.category_id.is_none()
    }

    /// Check if a record matches every set criterion
    pub fn matches(&self, enriched: &EnrichedRecord) -> bool {
        let record = &enriched.record;

        // Description
        if let Some(needle) = self.description_needle() {
            if !record.description.to_lowercase().contains(&needle) {
                return false;
            }
        }

        // Amount bounds; an unreadable amount never satisfies a bound
        if self.amount_min.is_some() || self.amount_max.is_some() {
            let Some(amount) = record.amount.value() else {
                return false;
            };
            if let Some(min) = self.amount_min {
                if amount < min {
                    return false;
                }
            }
            if let Some(max) = self.amount_max {
                if amount > max {
                    return false;
                }
            }
        }

        // Dates
        if let Some(from) = self.date_from {
            if record.date < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if record.date > to {
                return false;
            }
        }

        // Ids
        if let Some(id) = self.transaction_type_id {
            if record.transaction_type_id != id {
                return false;
            }
        }
        if let Some(id) = self.payment_method_id {
            if record.payment_method_id != id {
                return false;
            }
        }
        if let Some(id) = self.category_id {
            if record.category_id != id {
                return false;
            }
        }

        true
    }

    fn description_needle(&self) -> Option<String> {
        self.description_contains
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// Records that match `criteria`, in their original order
pub fn apply_filters(records: &[EnrichedRecord], criteria: &FilterCriteria) -> Vec<EnrichedRecord> {
    if criteria.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}
