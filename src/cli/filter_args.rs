//! Filter flags shared by the listing, report, chart and export commands

use chrono::NaiveDate;
use clap::Args;

use crate::display::format::{parse_amount, NumberLocale};
use crate::error::{GastosError, GastosResult};
use crate::models::{
    parse_calendar_date, CategoryId, Money, MonthKey, PaymentMethodId, TransactionTypeId,
};
use crate::services::FilterCriteria;

/// Filter flags; all optional and combined with AND
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only records whose description contains this text (case-insensitive)
    #[arg(short = 'd', long)]
    pub description: Option<String>,

    /// Minimum amount, inclusive (e.g. "1500" or "$ 1.500,00")
    #[arg(long)]
    pub min: Option<String>,

    /// Maximum amount, inclusive
    #[arg(long)]
    pub max: Option<String>,

    /// Start date, inclusive (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(long)]
    pub from: Option<String>,

    /// End date, inclusive (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(long)]
    pub to: Option<String>,

    /// Restrict to one calendar month (YYYY-MM); overrides --from/--to
    #[arg(long)]
    pub month: Option<String>,

    /// Transaction type ID
    #[arg(long = "type")]
    pub transaction_type: Option<String>,

    /// Payment method ID
    #[arg(long)]
    pub method: Option<String>,

    /// Category ID
    #[arg(long)]
    pub category: Option<String>,
}

impl FilterArgs {
    /// Build filter criteria, validating every flag
    pub fn to_criteria(&self, locale: &NumberLocale) -> GastosResult<FilterCriteria> {
        let (date_from, date_to) = match self.month {
            Some(ref month) => {
                let key = MonthKey::parse(month).map_err(|e| {
                    GastosError::Validation(format!("{}. Use YYYY-MM (e.g., 2024-01)", e))
                })?;
                (key.start_date(), key.end_date())
            }
            None => (
                self.from.as_deref().map(|s| parse_date("--from", s)).transpose()?,
                self.to.as_deref().map(|s| parse_date("--to", s)).transpose()?,
            ),
        };

        Ok(FilterCriteria {
            description_contains: self.description.clone(),
            amount_min: self.min.as_deref().map(|s| parse_money("--min", s, locale)).transpose()?,
            amount_max: self.max.as_deref().map(|s| parse_money("--max", s, locale)).transpose()?,
            date_from,
            date_to,
            transaction_type_id: self
                .transaction_type
                .as_deref()
                .map(|s| parse_id::<TransactionTypeId>("--type", s))
                .transpose()?,
            payment_method_id: self
                .method
                .as_deref()
                .map(|s| parse_id::<PaymentMethodId>("--method", s))
                .transpose()?,
            category_id: self
                .category
                .as_deref()
                .map(|s| parse_id::<CategoryId>("--category", s))
                .transpose()?,
        })
    }
}

fn parse_date(flag: &str, s: &str) -> GastosResult<NaiveDate> {
    parse_calendar_date(s).ok_or_else(|| {
        GastosError::Validation(format!(
            "Invalid date for {}: {}. Use YYYY-MM-DD or DD/MM/YYYY",
            flag, s
        ))
    })
}

/// Accepts the locale's own format first, then a plain decimal; a '.'
/// that cannot be a thousands separator is read as the decimal point
fn parse_money(flag: &str, s: &str, locale: &NumberLocale) -> GastosResult<Money> {
    parse_amount(s, locale)
        .or_else(|_| Money::parse(s))
        .map_err(|e| GastosError::Validation(format!("Invalid amount for {}: {}", flag, e)))
}

fn parse_id<I: std::str::FromStr>(flag: &str, s: &str) -> GastosResult<I> {
    s.parse()
        .map_err(|_| GastosError::Validation(format!("Invalid ID for {}: {}", flag, s)))
}
