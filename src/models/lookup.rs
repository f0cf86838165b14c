//! Lookup table entries
//!
//! Categories, payment methods, transaction types and currencies all share
//! the same shape on the backend: an id, a description and the owning user.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, CurrencyId, PaymentMethodId, TransactionTypeId, UserId};

/// The four lookup tables a record refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Category,
    PaymentMethod,
    TransactionType,
    Currency,
}

impl LookupKind {
    /// All lookup kinds
    pub fn all() -> &'static [Self] {
        &[
            Self::Category,
            Self::PaymentMethod,
            Self::TransactionType,
            Self::Currency,
        ]
    }

    /// Backend resource name for this table
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Category => "categorias",
            Self::PaymentMethod => "metodosPagos",
            Self::TransactionType => "tiposTransacciones",
            Self::Currency => "divisas",
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Category => "Categoría",
            Self::PaymentMethod => "Método de Pago",
            Self::TransactionType => "Tipo de Transacción",
            Self::Currency => "Divisa",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single lookup table entry, keyed by the table's id type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry<I> {
    pub id: I,

    #[serde(rename = "descripcion")]
    pub description: String,

    #[serde(rename = "usuario_id")]
    pub user_id: UserId,
}

impl<I> LookupEntry<I> {
    pub fn new(id: I, description: impl Into<String>, user_id: UserId) -> Self {
        Self {
            id,
            description: description.into(),
            user_id,
        }
    }
}

pub type Category = LookupEntry<CategoryId>;
pub type PaymentMethod = LookupEntry<PaymentMethodId>;
pub type TransactionType = LookupEntry<TransactionTypeId>;
pub type Currency = LookupEntry<CurrencyId>;
