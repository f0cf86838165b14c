//! Record store
//!
//! Holds the current snapshot of one user's records and lookup tables. A
//! snapshot is immutable; loads and edits install a new `Arc<Snapshot>`
//! instead of changing the installed one.

use std::sync::Arc;
use std::thread::{self, ScopedJoinHandle};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::source::{DataSource, EXPENSES_RESOURCE};
use crate::error::{GastosError, GastosResult};
use crate::models::{
    Category, Currency, ExpenseId, ExpensePatch, ExpenseRecord, LookupKind, PaymentMethod,
    TransactionType, UserId,
};
use crate::services::lookup::LookupIndex;
use crate::session::Session;

/// Everything fetched for one user at one point in time
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub user_id: UserId,
    pub records: Vec<ExpenseRecord>,
    pub categories: Vec<Category>,
    pub payment_methods: Vec<PaymentMethod>,
    pub transaction_types: Vec<TransactionType>,
    pub currencies: Vec<Currency>,
    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    /// An empty snapshot for a user
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            records: Vec::new(),
            categories: Vec::new(),
            payment_methods: Vec::new(),
            transaction_types: Vec::new(),
            currencies: Vec::new(),
            loaded_at: Utc::now(),
        }
    }

    /// Find a record by id
    pub fn record(&self, id: ExpenseId) -> Option<&ExpenseRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    fn with_records(&self, records: Vec<ExpenseRecord>) -> Self {
        Self {
            records,
            loaded_at: Utc::now(),
            ..self.clone()
        }
    }
}

/// Holds the active snapshot
#[derive(Debug, Default)]
pub struct RecordStore {
    current: Option<Arc<Snapshot>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the session user's records and lookups and install them
    ///
    /// The five reads run concurrently. If any of them fails, the error is
    /// returned and the previously installed snapshot stays in place.
    pub fn load(
        &mut self,
        source: &dyn DataSource,
        session: &Session,
    ) -> GastosResult<Arc<Snapshot>> {
        let user_id = session.user_id;
        debug!(%user_id, "loading snapshot");

        let (records, categories, payment_methods, transaction_types, currencies) =
            thread::scope(|scope| {
                let records = scope.spawn(|| source.fetch_expenses(user_id));
                let categories = scope.spawn(|| source.fetch_categories(user_id));
                let methods = scope.spawn(|| source.fetch_payment_methods(user_id));
                let types = scope.spawn(|| source.fetch_transaction_types(user_id));
                let currencies = scope.spawn(|| source.fetch_currencies(user_id));

                (
                    join_fetch(records, EXPENSES_RESOURCE),
                    join_fetch(categories, LookupKind::Category.resource()),
                    join_fetch(methods, LookupKind::PaymentMethod.resource()),
                    join_fetch(types, LookupKind::TransactionType.resource()),
                    join_fetch(currencies, LookupKind::Currency.resource()),
                )
            });

        let snapshot = Snapshot {
            user_id,
            records: records?,
            categories: categories?,
            payment_methods: payment_methods?,
            transaction_types: transaction_types?,
            currencies: currencies?,
            loaded_at: Utc::now(),
        };

        debug!(
            records = snapshot.records.len(),
            categories = snapshot.categories.len(),
            "snapshot loaded"
        );

        Ok(self.install(snapshot))
    }

    /// The installed snapshot, if a load has succeeded
    pub fn current_snapshot(&self) -> Option<Arc<Snapshot>> {
        self.current.clone()
    }

    /// Replace the installed snapshot
    pub fn install(&mut self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        self.current = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Apply a validated edit to one record
    ///
    /// Ids in the patch must exist in the user's lookup tables.
    pub fn apply_patch(
        &mut self,
        id: ExpenseId,
        patch: &ExpensePatch,
    ) -> GastosResult<Arc<Snapshot>> {
        let snapshot = self.require_snapshot()?;

        patch
            .validate()
            .map_err(|e| GastosError::Validation(e.to_string()))?;
        check_patch_ids(&snapshot, patch)?;

        let existing = snapshot
            .record(id)
            .ok_or_else(|| GastosError::expense_not_found(id.to_string()))?;
        let updated = patch.apply_to(existing);

        let records = snapshot
            .records
            .iter()
            .map(|r| if r.id == id { updated.clone() } else { r.clone() })
            .collect();

        debug!(%id, "record patched");
        Ok(self.install(snapshot.with_records(records)))
    }

    /// Drop one record from the snapshot
    pub fn remove(&mut self, id: ExpenseId) -> GastosResult<Arc<Snapshot>> {
        let snapshot = self.require_snapshot()?;

        if snapshot.record(id).is_none() {
            return Err(GastosError::expense_not_found(id.to_string()));
        }

        let records = snapshot
            .records
            .iter()
            .filter(|r| r.id != id)
            .cloned()
            .collect();

        debug!(%id, "record removed");
        Ok(self.install(snapshot.with_records(records)))
    }

    fn require_snapshot(&self) -> GastosResult<Arc<Snapshot>> {
        self.current
            .clone()
            .ok_or_else(|| GastosError::Storage("No snapshot loaded".into()))
    }
}

fn join_fetch<T>(
    handle: ScopedJoinHandle<'_, GastosResult<T>>,
    resource: &'static str,
) -> GastosResult<T> {
    let result = handle
        .join()
        .unwrap_or_else(|_| Err(GastosError::fetch(resource, "reader thread panicked")));

    result.map_err(|e| {
        warn!(resource, error = %e, "fetch failed");
        match e {
            GastosError::Fetch { .. } => e,
            other => GastosError::fetch(resource, other.to_string()),
        }
    })
}

fn check_patch_ids(snapshot: &Snapshot, patch: &ExpensePatch) -> GastosResult<()> {
    let user_id = snapshot.user_id;
    let missing = |kind: LookupKind, id: String| {
        GastosError::Validation(format!("{} {} does not exist", kind.name(), id))
    };

    if let Some(id) = patch.category_id {
        if !LookupIndex::build(&snapshot.categories, user_id).contains(id) {
            return Err(missing(LookupKind::Category, id.to_string()));
        }
    }
    if let Some(id) = patch.payment_method_id {
        if !LookupIndex::build(&snapshot.payment_methods, user_id).contains(id) {
            return Err(missing(LookupKind::PaymentMethod, id.to_string()));
        }
    }
    if let Some(id) = patch.transaction_type_id {
        if !LookupIndex::build(&snapshot.transaction_types, user_id).contains(id) {
            return Err(missing(LookupKind::TransactionType, id.to_string()));
        }
    }
    if let Some(id) = patch.currency_id {
        if !LookupIndex::build(&snapshot.currencies, user_id).contains(id) {
            return Err(missing(LookupKind::Currency, id.to_string()));
        }
    }

    Ok(())
}
