//! Reports module for gastos
//!
//! Aggregates over an enriched record set: summary totals by currency,
//! monthly income/expense series and per-category breakdowns. All of them
//! are pure functions of their input.

pub mod category;
pub mod monthly;
pub mod summary;

pub use category::{category_aggregate, CategoryAggregate, CategoryReport};
pub use monthly::{monthly_aggregate, MonthlyAggregate, MonthlyReport};
pub use summary::SummaryTotals;
