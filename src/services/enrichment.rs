//! Enrichment joiner
//!
//! Joins each record of a snapshot with the descriptions of its currency,
//! transaction type, payment method and category.

use serde::Serialize;
use tracing::debug;

use super::lookup::{LookupIndex, Resolved, UNCATEGORIZED_LABEL};
use crate::models::{
    CategoryId, CurrencyId, Direction, ExpenseRecord, PaymentMethodId, TransactionTypeId,
    INCOME_LABEL,
};
use crate::storage::Snapshot;

/// A record with its foreign ids resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: ExpenseRecord,

    #[serde(rename = "divisa")]
    pub currency: Resolved,

    #[serde(rename = "tipoTransaccion")]
    pub transaction_type: Resolved,

    #[serde(rename = "metodoPago")]
    pub payment_method: Resolved,

    #[serde(rename = "categoria")]
    pub category: Resolved,
}

impl EnrichedRecord {
    /// Income or expense, if the transaction type is one of the two
    pub fn direction(&self) -> Option<Direction> {
        match &self.transaction_type {
            Resolved::Known(label) => Direction::from_label(label),
            Resolved::Unknown => None,
        }
    }

    /// True for "Ingreso" records
    pub fn is_income(&self) -> bool {
        self.transaction_type.is(INCOME_LABEL)
    }

    /// Category label as shown in category breakdowns
    pub fn category_label(&self) -> &str {
        self.category.label_or(UNCATEGORIZED_LABEL)
    }
}

/// The four lookup indices of one snapshot
#[derive(Debug, Clone)]
pub struct LookupTables {
    pub currencies: LookupIndex<CurrencyId>,
    pub transaction_types: LookupIndex<TransactionTypeId>,
    pub payment_methods: LookupIndex<PaymentMethodId>,
    pub categories: LookupIndex<CategoryId>,
}

impl LookupTables {
    pub fn build(snapshot: &Snapshot) -> Self {
        let user_id = snapshot.user_id;
        Self {
            currencies: LookupIndex::build(&snapshot.currencies, user_id),
            transaction_types: LookupIndex::build(&snapshot.transaction_types, user_id),
            payment_methods: LookupIndex::build(&snapshot.payment_methods, user_id),
            categories: LookupIndex::build(&snapshot.categories, user_id),
        }
    }

    pub fn enrich_record(&self, record: &ExpenseRecord) -> EnrichedRecord {
        EnrichedRecord {
            currency: self.currencies.resolve(record.currency_id),
            transaction_type: self.transaction_types.resolve(record.transaction_type_id),
            payment_method: self.payment_methods.resolve(record.payment_method_id),
            category: self.categories.resolve(record.category_id),
            record: record.clone(),
        }
    }
}

/// Enrich every record of a snapshot, keeping input order
pub fn enrich(snapshot: &Snapshot) -> Vec<EnrichedRecord> {
    let tables = LookupTables::build(snapshot);
    let enriched: Vec<_> = snapshot
        .records
        .iter()
        .map(|record| tables.enrich_record(record))
        .collect();

    debug!(count = enriched.len(), "records enriched");
    enriched
}
