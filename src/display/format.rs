//! Amount and date formatting
//!
//! Amounts are rendered with two decimals, locale separators and a currency
//! symbol; `parse_amount` reads that output back. Dates are rendered as
//! DD/MM/YYYY from their UTC calendar date.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Money, MoneyParseError, MonthKey};

/// Supported number locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LocaleKind {
    /// Argentine Spanish: `$ 1.234,56`
    #[default]
    #[serde(rename = "es-AR")]
    EsAr,
    /// US English: `$1,234.56`
    #[serde(rename = "en-US")]
    EnUs,
}

impl LocaleKind {
    pub fn number_locale(&self) -> NumberLocale {
        match self {
            Self::EsAr => NumberLocale::es_ar(),
            Self::EnUs => NumberLocale::en_us(),
        }
    }
}

/// Separators and symbol used to render an amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberLocale {
    pub symbol: String,
    pub space_after_symbol: bool,
    pub thousands_sep: char,
    pub decimal_sep: char,
}

impl NumberLocale {
    pub fn es_ar() -> Self {
        Self {
            symbol: "$".to_string(),
            space_after_symbol: true,
            thousands_sep: '.',
            decimal_sep: ',',
        }
    }

    pub fn en_us() -> Self {
        Self {
            symbol: "$".to_string(),
            space_after_symbol: false,
            thousands_sep: ',',
            decimal_sep: '.',
        }
    }

    /// Same separators, different currency symbol
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }
}

/// Display symbol for a currency description
pub fn currency_symbol(currency: &str) -> &str {
    match currency {
        "ARS" => "$",
        "USD" => "US$",
        other => other,
    }
}

/// Format an amount: `$ 1.234,56` for es-AR, `-$ 1.234,56` when negative
pub fn format_amount(amount: Money, locale: &NumberLocale) -> String {
    let units = amount.units().unsigned_abs().to_string();

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(locale.thousands_sep);
        }
        grouped.push(digit);
    }

    let sign = if amount.is_negative() { "-" } else { "" };
    let space = if locale.space_after_symbol { " " } else { "" };

    format!(
        "{}{}{}{}{}{:02}",
        sign,
        locale.symbol,
        space,
        grouped,
        locale.decimal_sep,
        amount.cents_part()
    )
}

/// Parse an amount written with the locale's separators and symbol
pub fn parse_amount(text: &str, locale: &NumberLocale) -> Result<Money, MoneyParseError> {
    let invalid = || MoneyParseError::InvalidFormat(text.to_string());

    let mut rest = text.trim();
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped.trim_start();
    }
    if let Some(stripped) = rest.strip_prefix(locale.symbol.as_str()) {
        rest = stripped.trim_start();
    }
    if let Some(stripped) = rest.strip_prefix('-') {
        if negative {
            return Err(invalid());
        }
        negative = true;
        rest = stripped.trim_start();
    }

    let (integer, fraction) = match rest.split_once(locale.decimal_sep) {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (rest, None),
    };
    if !thousands_grouped(integer, locale.thousands_sep) {
        return Err(invalid());
    }

    let mut normalized: String = integer.chars().filter(|c| *c != locale.thousands_sep).collect();
    if let Some(fraction) = fraction {
        normalized.push('.');
        normalized.push_str(fraction);
    }

    if normalized.starts_with(['-', '+']) {
        return Err(invalid());
    }

    let amount = Money::parse(&normalized).map_err(|_| invalid())?;
    Ok(if negative { -amount } else { amount })
}

/// With separators present, the leading group holds one to three digits
/// and every later group exactly three
fn thousands_grouped(integer: &str, sep: char) -> bool {
    if !integer.contains(sep) {
        return true;
    }
    let digits = |g: &str| g.chars().all(|c| c.is_ascii_digit());
    let mut groups = integer.split(sep);
    let leading_ok = groups
        .next()
        .is_some_and(|g| (1..=3).contains(&g.len()) && digits(g));
    leading_ok && groups.all(|g| g.len() == 3 && digits(g))
}

/// Format a calendar date as DD/MM/YYYY
pub fn format_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
}

/// Format the UTC calendar date of a timestamp as DD/MM/YYYY
pub fn format_date_utc<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String {
    format_date(timestamp.with_timezone(&Utc).date_naive())
}

const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Spanish month name
pub fn month_name(key: MonthKey) -> &'static str {
    MONTH_NAMES[key.month0()]
}

/// Label for a month on chart axes ("Enero 2024")
pub fn month_label(key: MonthKey) -> String {
    format!("{} {}", month_name(key), key.year())
}
