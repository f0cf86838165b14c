//! Summary Report
//!
//! Running totals by currency and direction over every loaded record.

use serde::Serialize;
use std::io::Write;
use tracing::warn;

use crate::display::format::{currency_symbol, format_amount, NumberLocale};
use crate::error::GastosResult;
use crate::models::{Money, EXPENSE_LABEL};
use crate::services::EnrichedRecord;

pub const ARS: &str = "ARS";
pub const USD: &str = "USD";
pub const USDT: &str = "USDT";

/// Currency and direction totals
///
/// ARS keeps income and expense apart; `total_ars`, `total_usd` and
/// `total_usdt` are signed nets where "Ingreso" adds and every other
/// transaction type subtracts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryTotals {
    pub expense_ars: Money,
    pub income_ars: Money,
    pub total_usd: Money,
    pub total_usdt: Money,
    pub total_ars: Money,
}

impl SummaryTotals {
    /// Compute totals over `records`
    pub fn compute(records: &[EnrichedRecord]) -> Self {
        let mut totals = Self::default();

        for enriched in records {
            let Some(amount) = enriched.record.amount.value() else {
                warn!(
                    id = %enriched.record.id,
                    raw = %enriched.record.amount,
                    "skipping record with malformed amount"
                );
                continue;
            };

            let signed = if enriched.is_income() { amount } else { -amount };

            if enriched.currency.is(ARS) {
                if enriched.transaction_type.is(EXPENSE_LABEL) {
                    totals.expense_ars += amount;
                } else if enriched.is_income() {
                    totals.income_ars += amount;
                }
                totals.total_ars += signed;
            } else if enriched.currency.is(USD) {
                totals.total_usd += signed;
            } else if enriched.currency.is(USDT) {
                totals.total_usdt += signed;
            }
        }

        totals
    }

    /// Format the totals for terminal display
    pub fn format_terminal(&self, locale: &NumberLocale) -> String {
        let usd = locale.clone().with_symbol(currency_symbol(USD));
        let usdt = locale.clone().with_symbol(currency_symbol(USDT));

        let mut output = String::new();
        output.push_str("Resumen\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');

        let rows = [
            ("Egresos ARS", format_amount(self.expense_ars, locale)),
            ("Ingresos ARS", format_amount(self.income_ars, locale)),
            ("Total ARS", format_amount(self.total_ars, locale)),
            ("Total USD", format_amount(self.total_usd, &usd)),
            ("Total USDT", format_amount(self.total_usdt, &usdt)),
        ];
        for (label, value) in rows {
            output.push_str(&format!("{:<20} {:>19}\n", label, value));
        }

        output
    }

    /// Export the totals to CSV, one row per figure
    pub fn export_csv<W: Write>(&self, writer: W) -> GastosResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Concepto", "Divisa", "Monto"])?;

        let rows = [
            ("Egresos", ARS, self.expense_ars),
            ("Ingresos", ARS, self.income_ars),
            ("Total", ARS, self.total_ars),
            ("Total", USD, self.total_usd),
            ("Total", USDT, self.total_usdt),
        ];
        for (concept, currency, amount) in rows {
            let amount = amount.to_decimal_string();
            csv.write_record([concept, currency, amount.as_str()])?;
        }

        csv.flush()?;
        Ok(())
    }
}
