//! Core data models for gastos
//!
//! This module contains the data structures of the expense domain: records,
//! lookup tables, money, month keys and typed edits.

pub mod expense;
pub mod ids;
pub mod lookup;
pub mod money;
pub mod patch;
pub mod period;

pub use expense::{
    parse_calendar_date, Amount, Direction, ExpenseRecord, EXPENSE_LABEL, INCOME_LABEL,
};
pub use ids::{CategoryId, CurrencyId, ExpenseId, PaymentMethodId, TransactionTypeId, UserId};
pub use lookup::{Category, Currency, LookupEntry, LookupKind, PaymentMethod, TransactionType};
pub use money::{Money, MoneyParseError};
pub use patch::{ExpensePatch, PatchValidationError};
pub use period::MonthKey;
