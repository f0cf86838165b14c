//! Display formatting for terminal output
//!
//! Amount and date formatting, the listing table and chart series.

pub mod chart;
pub mod format;
pub mod table;

pub use chart::{
    amount_series, assign_colors, category_series, format_bar, monthly_series, ChartSeries,
    MonthlyChart, PALETTE,
};
pub use format::{
    currency_symbol, format_amount, format_date, format_date_utc, month_label, parse_amount,
    LocaleKind, NumberLocale,
};
pub use table::{format_record_table, truncate};
