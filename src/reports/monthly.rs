//! Monthly Report
//!
//! Income and expense totals per calendar month, in chronological order.

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use tracing::warn;

use crate::display::format::{format_amount, month_label, NumberLocale};
use crate::error::GastosResult;
use crate::models::{Direction, Money, MonthKey};
use crate::services::EnrichedRecord;

/// Totals for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyAggregate {
    pub month_key: MonthKey,
    pub income_total: Money,
    pub expense_total: Money,
    /// Display label, e.g. "Enero 2024"
    pub month_label: String,
}

impl MonthlyAggregate {
    fn empty(month_key: MonthKey) -> Self {
        Self {
            month_key,
            income_total: Money::zero(),
            expense_total: Money::zero(),
            month_label: month_label(month_key),
        }
    }

    /// Income minus expense for the month
    pub fn net(&self) -> Money {
        self.income_total - self.expense_total
    }
}

/// Group records by month, summing "Ingreso" and "Egreso" amounts
///
/// Every month with at least one record gets an entry, even when none of
/// its records is income or expense. Entries are sorted by month.
pub fn monthly_aggregate(records: &[EnrichedRecord]) -> Vec<MonthlyAggregate> {
    let mut months: BTreeMap<MonthKey, MonthlyAggregate> = BTreeMap::new();

    for enriched in records {
        let key = MonthKey::from_date(enriched.record.date);
        let entry = months
            .entry(key)
            .or_insert_with(|| MonthlyAggregate::empty(key));

        let Some(amount) = enriched.record.amount.value() else {
            warn!(
                id = %enriched.record.id,
                raw = %enriched.record.amount,
                "skipping record with malformed amount"
            );
            continue;
        };

        match enriched.direction() {
            Some(Direction::Income) => entry.income_total += amount,
            Some(Direction::Expense) => entry.expense_total += amount,
            None => {}
        }
    }

    months.into_values().collect()
}

/// Monthly report over a record set
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    pub months: Vec<MonthlyAggregate>,
}

impl MonthlyReport {
    pub fn generate(records: &[EnrichedRecord]) -> Self {
        Self {
            months: monthly_aggregate(records),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, locale: &NumberLocale) -> String {
        let mut output = String::new();

        output.push_str("Reporte mensual\n");
        output.push_str(&"=".repeat(70));
        output.push('\n');

        if self.months.is_empty() {
            output.push_str("Sin movimientos.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<18} {:>16} {:>16} {:>16}\n",
            "Mes", "Ingresos", "Egresos", "Neto"
        ));
        output.push_str(&"-".repeat(70));
        output.push('\n');

        let mut income = Money::zero();
        let mut expense = Money::zero();
        for month in &self.months {
            output.push_str(&format!(
                "{:<18} {:>16} {:>16} {:>16}\n",
                month.month_label,
                format_amount(month.income_total, locale),
                format_amount(month.expense_total, locale),
                format_amount(month.net(), locale)
            ));
            income += month.income_total;
            expense += month.expense_total;
        }

        output.push_str(&"-".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "{:<18} {:>16} {:>16} {:>16}\n",
            "TOTAL",
            format_amount(income, locale),
            format_amount(expense, locale),
            format_amount(income - expense, locale)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> GastosResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Mes", "Etiqueta", "Ingresos", "Egresos", "Neto"])?;

        for month in &self.months {
            csv.write_record([
                month.month_key.to_string(),
                month.month_label.clone(),
                month.income_total.to_decimal_string(),
                month.expense_total.to_decimal_string(),
                month.net().to_decimal_string(),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::enrichment::fixtures::{date, enriched, malformed};

    #[test]
    fn test_same_month_income_and_expense() {
        let records = vec![
            enriched(1, "Cafe", 3000, date(2024, 1, 3), "ARS", "Egreso", None),
            enriched(2, "Venta", 7000, date(2024, 1, 25), "ARS", "Ingreso", None),
        ];

        let months = monthly_aggregate(&records);
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].month_key, MonthKey::new(2024, 1).unwrap());
        assert_eq!(months[0].expense_total, Money::from_cents(3000));
        assert_eq!(months[0].income_total, Money::from_cents(7000));
        assert_eq!(months[0].month_label, "Enero 2024");
    }

    #[test]
    fn test_months_are_sorted_and_unique() {
        let records = vec![
            enriched(1, "a", 100, date(2024, 3, 1), "ARS", "Egreso", None),
            enriched(2, "b", 100, date(2023, 12, 31), "ARS", "Egreso", None),
            enriched(3, "c", 100, date(2024, 1, 10), "ARS", "Ingreso", None),
            enriched(4, "d", 100, date(2024, 3, 20), "ARS", "Ingreso", None),
            enriched(5, "e", 100, date(2024, 1, 11), "USD", "Egreso", None),
        ];

        let keys: Vec<_> = monthly_aggregate(&records)
            .iter()
            .map(|m| m.month_key)
            .collect();
        assert_eq!(
            keys,
            vec![
                MonthKey::new(2023, 12).unwrap(),
                MonthKey::new(2024, 1).unwrap(),
                MonthKey::new(2024, 3).unwrap()
            ]
        );
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_other_types_and_malformed_amounts_add_nothing() {
        let records = vec![
            enriched(1, "Pase", 500, date(2024, 5, 1), "ARS", "Transferencia", None),
            malformed(2, "xx", "ARS", "Egreso"),
        ];

        let months = monthly_aggregate(&records);
        assert_eq!(months.len(), 2);
        assert!(months
            .iter()
            .all(|m| m.income_total.is_zero() && m.expense_total.is_zero()));
    }

    #[test]
    fn test_empty_input() {
        assert!(monthly_aggregate(&[]).is_empty());
        let report = MonthlyReport::generate(&[]);
        assert!(report.format_terminal(&NumberLocale::es_ar()).contains("Sin movimientos"));
    }

    #[test]
    fn test_export_csv() {
        let records = vec![
            enriched(1, "Cafe", 3000, date(2024, 2, 3), "ARS", "Egreso", None),
            enriched(2, "Venta", 7000, date(2024, 2, 25), "ARS", "Ingreso", None),
        ];
        let mut buffer = Vec::new();
        MonthlyReport::generate(&records).export_csv(&mut buffer).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "Mes,Etiqueta,Ingresos,Egresos,Neto");
        assert_eq!(lines[1], "2024-02,Febrero 2024,70.00,30.00,40.00");
    }
}
