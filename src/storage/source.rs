//! Data sources for a user's records and lookup tables
//!
//! The record store only knows the `DataSource` trait: five reads scoped by
//! user id. `JsonDirSource` serves them from JSON dumps of the backend
//! resources, one file per resource.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use super::file_io::read_json_required;
use crate::error::{GastosError, GastosResult};
use crate::models::{
    Category, Currency, ExpenseRecord, LookupEntry, LookupKind, PaymentMethod, TransactionType,
    UserId,
};

/// Backend resource name for expense records
pub const EXPENSES_RESOURCE: &str = "gastos";

/// The five reads a snapshot is built from
///
/// Implementations must be `Sync`: the record store issues the reads from
/// several threads at once.
pub trait DataSource: Sync {
    fn fetch_expenses(&self, user_id: UserId) -> GastosResult<Vec<ExpenseRecord>>;
    fn fetch_categories(&self, user_id: UserId) -> GastosResult<Vec<Category>>;
    fn fetch_payment_methods(&self, user_id: UserId) -> GastosResult<Vec<PaymentMethod>>;
    fn fetch_transaction_types(&self, user_id: UserId) -> GastosResult<Vec<TransactionType>>;
    fn fetch_currencies(&self, user_id: UserId) -> GastosResult<Vec<Currency>>;
}

/// Reads `<resource>.json` files from a directory
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing a resource
    pub fn resource_path(&self, resource: &str) -> PathBuf {
        self.dir.join(format!("{}.json", resource))
    }

    fn read_resource<T: DeserializeOwned>(&self, resource: &'static str) -> GastosResult<Vec<T>> {
        let path = self.resource_path(resource);
        if !path.exists() {
            return Err(GastosError::fetch(
                resource,
                format!("{} does not exist", path.display()),
            ));
        }
        read_json_required(&path).map_err(|e| GastosError::fetch(resource, e.to_string()))
    }

    fn read_lookup<I>(&self, kind: LookupKind, user_id: UserId) -> GastosResult<Vec<LookupEntry<I>>>
    where
        I: DeserializeOwned,
    {
        let entries: Vec<LookupEntry<I>> = self.read_resource(kind.resource())?;
        let owned: Vec<_> = entries
            .into_iter()
            .filter(|entry| entry.user_id == user_id)
            .collect();
        debug!(resource = kind.resource(), count = owned.len(), "read lookup table");
        Ok(owned)
    }
}

impl DataSource for JsonDirSource {
    fn fetch_expenses(&self, user_id: UserId) -> GastosResult<Vec<ExpenseRecord>> {
        let records: Vec<ExpenseRecord> = self.read_resource(EXPENSES_RESOURCE)?;
        let owned: Vec<_> = records
            .into_iter()
            .filter(|record| record.user_id == user_id)
            .collect();
        debug!(resource = EXPENSES_RESOURCE, count = owned.len(), "read records");
        Ok(owned)
    }

    fn fetch_categories(&self, user_id: UserId) -> GastosResult<Vec<Category>> {
        self.read_lookup(LookupKind::Category, user_id)
    }

    fn fetch_payment_methods(&self, user_id: UserId) -> GastosResult<Vec<PaymentMethod>> {
        self.read_lookup(LookupKind::PaymentMethod, user_id)
    }

    fn fetch_transaction_types(&self, user_id: UserId) -> GastosResult<Vec<TransactionType>> {
        self.read_lookup(LookupKind::TransactionType, user_id)
    }

    fn fetch_currencies(&self, user_id: UserId) -> GastosResult<Vec<Currency>> {
        self.read_lookup(LookupKind::Currency, user_id)
    }
}
