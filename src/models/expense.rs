//! Expense record model
//!
//! An expense record ("gasto") is a single income or expense entry as the
//! backend returns it. Field names on the wire follow the backend JSON
//! (`descripcion`, `monto`, `fecha`, ...).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ids::{CategoryId, CurrencyId, ExpenseId, PaymentMethodId, TransactionTypeId, UserId};
use super::money::Money;

/// Transaction type label for income
pub const INCOME_LABEL: &str = "Ingreso";

/// Transaction type label for expenses
pub const EXPENSE_LABEL: &str = "Egreso";

/// Direction of a transaction, derived from its transaction type label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Income,
    Expense,
}

impl Direction {
    /// Map a transaction type description to a direction
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            INCOME_LABEL => Some(Self::Income),
            EXPENSE_LABEL => Some(Self::Expense),
            _ => None,
        }
    }

    /// The transaction type description for this direction
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => INCOME_LABEL,
            Self::Expense => EXPENSE_LABEL,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The amount of a record as received
///
/// The backend sends `monto` either as a number or as a string. A value
/// that cannot be read as money is kept verbatim so it can be reported,
/// and is left out of every numeric aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAmount", into = "RawAmount")]
pub enum Amount {
    Valid(Money),
    Malformed(String),
}

impl Amount {
    /// The parsed amount, if it was well formed
    pub fn value(&self) -> Option<Money> {
        match self {
            Self::Valid(money) => Some(*money),
            Self::Malformed(_) => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}

impl From<Money> for Amount {
    fn from(money: Money) -> Self {
        Self::Valid(money)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(money) => f.pad(&money.to_decimal_string()),
            Self::Malformed(raw) => f.pad(raw),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl From<RawAmount> for Amount {
    fn from(raw: RawAmount) -> Self {
        let text = match raw {
            RawAmount::Number(n) => n.to_string(),
            RawAmount::Text(s) => s,
            RawAmount::Other(v) => return Self::Malformed(v.to_string()),
        };
        match Money::parse(&text) {
            Ok(money) => Self::Valid(money),
            Err(_) => Self::Malformed(text),
        }
    }
}

impl From<Amount> for RawAmount {
    fn from(amount: Amount) -> Self {
        match amount {
            Amount::Valid(money) => RawAmount::Text(money.to_decimal_string()),
            Amount::Malformed(raw) => RawAmount::Text(raw),
        }
    }
}

/// A single expense or income record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,

    #[serde(rename = "descripcion")]
    pub description: String,

    #[serde(rename = "monto")]
    pub amount: Amount,

    /// Calendar date of the record (no time-of-day)
    #[serde(rename = "fecha", deserialize_with = "deserialize_calendar_date")]
    pub date: NaiveDate,

    #[serde(rename = "divisa_id")]
    pub currency_id: CurrencyId,

    #[serde(rename = "tipostransaccion_id")]
    pub transaction_type_id: TransactionTypeId,

    #[serde(rename = "metodopago_id")]
    pub payment_method_id: PaymentMethodId,

    #[serde(rename = "categoria_id")]
    pub category_id: CategoryId,

    #[serde(rename = "usuario_id")]
    pub user_id: UserId,
}

impl ExpenseRecord {
    /// Create a record with all foreign ids set to 0
    pub fn new(
        id: ExpenseId,
        user_id: UserId,
        description: impl Into<String>,
        amount: impl Into<Amount>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            amount: amount.into(),
            date,
            currency_id: CurrencyId::new(0),
            transaction_type_id: TransactionTypeId::new(0),
            payment_method_id: PaymentMethodId::new(0),
            category_id: CategoryId::new(0),
            user_id,
        }
    }
}

/// Parse a calendar date as the backend or a user may write it
///
/// Accepts `YYYY-MM-DD`, RFC 3339 date-times (reduced to their UTC date),
/// naive `YYYY-MM-DDTHH:MM:SS` (taken as UTC) and `DD/MM/YYYY`.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
}

fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_calendar_date(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", s)))
}
