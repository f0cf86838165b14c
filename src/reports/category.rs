//! Category Report
//!
//! Totals per category label for one transaction type.

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use tracing::warn;

use crate::display::format::{format_amount, NumberLocale};
use crate::error::GastosResult;
use crate::models::Money;
use crate::services::EnrichedRecord;

/// Category label to total, for records of one transaction type
///
/// Only categories that occur in the input appear; entries iterate in
/// label order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryAggregate {
    pub transaction_type: String,
    pub totals: BTreeMap<String, Money>,
}

impl CategoryAggregate {
    /// Total for one category label
    pub fn get(&self, label: &str) -> Option<Money> {
        self.totals.get(label).copied()
    }

    /// Entries in label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> {
        self.totals.iter().map(|(label, total)| (label.as_str(), *total))
    }

    pub fn labels(&self) -> Vec<String> {
        self.totals.keys().cloned().collect()
    }

    /// Sum over all categories
    pub fn total(&self) -> Money {
        self.totals.values().copied().sum()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Sum the records of `transaction_type` per category
///
/// Unresolved categories are grouped under "Sin Categoría".
pub fn category_aggregate(records: &[EnrichedRecord], transaction_type: &str) -> CategoryAggregate {
    let mut totals: BTreeMap<String, Money> = BTreeMap::new();

    for enriched in records
        .iter()
        .filter(|r| r.transaction_type.is(transaction_type))
    {
        let Some(amount) = enriched.record.amount.value() else {
            warn!(
                id = %enriched.record.id,
                raw = %enriched.record.amount,
                "skipping record with malformed amount"
            );
            continue;
        };

        *totals
            .entry(enriched.category_label().to_string())
            .or_insert_with(Money::zero) += amount;
    }

    CategoryAggregate {
        transaction_type: transaction_type.to_string(),
        totals,
    }
}

/// Category report over a record set
#[derive(Debug, Clone, Serialize)]
pub struct CategoryReport {
    pub aggregate: CategoryAggregate,
}

impl CategoryReport {
    pub fn generate(records: &[EnrichedRecord], transaction_type: &str) -> Self {
        Self {
            aggregate: category_aggregate(records, transaction_type),
        }
    }

    fn percentage(&self, amount: Money) -> f64 {
        let total = self.aggregate.total();
        if total.is_zero() {
            0.0
        } else {
            (amount.cents() as f64 / total.cents() as f64) * 100.0
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, locale: &NumberLocale) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Categorías ({})\n",
            self.aggregate.transaction_type
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.aggregate.is_empty() {
            output.push_str("Sin movimientos.\n");
            return output;
        }

        output.push_str(&format!("{:<32} {:>18} {:>7}\n", "Categoría", "Monto", "%"));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for (label, total) in self.aggregate.iter() {
            output.push_str(&format!(
                "{:<32} {:>18} {:>6.1}%\n",
                label,
                format_amount(total, locale),
                self.percentage(total)
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<32} {:>18}\n",
            "TOTAL",
            format_amount(self.aggregate.total(), locale)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> GastosResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Tipo_Transacción", "Categoría", "Monto", "Porcentaje"])?;

        for (label, total) in self.aggregate.iter() {
            csv.write_record([
                self.aggregate.transaction_type.clone(),
                label.to_string(),
                total.to_decimal_string(),
                format!("{:.2}", self.percentage(total)),
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

    fn records() -> Vec<EnrichedRecord> {
        vec![
            enriched(1, "Super", 10000, date(2024, 1, 2), "ARS", "Egreso", Some("Comida")),
            enriched(2, "Kiosco", 2500, date(2024, 1, 3), "ARS", "Egreso", Some("Comida")),
            enriched(3, "Colectivo", 800, date(2024, 1, 4), "ARS", "Egreso", Some("Transporte")),
            enriched(4, "Sueldo", 500000, date(2024, 1, 31), "ARS", "Ingreso", Some("Trabajo")),
            enriched(5, "Regalo", 3000, date(2024, 2, 1), "ARS", "Egreso", None),
        ]
    }

    #[test]
    fn test_sums_per_category() {
        let aggregate = category_aggregate(&records(), "Egreso");
        assert_eq!(aggregate.get("Comida"), Some(Money::from_cents(12500)));
        assert_eq!(aggregate.get("Transporte"), Some(Money::from_cents(800)));
        assert_eq!(aggregate.total(), Money::from_cents(16300));
    }

    #[test]
    fn test_unresolved_category_is_sin_categoria() {
        let aggregate = category_aggregate(&records(), "Egreso");
        assert_eq!(aggregate.get("Sin Categoría"), Some(Money::from_cents(3000)));
    }

    #[test]
    fn test_expense_breakdown_has_no_income_only_categories() {
        let aggregate = category_aggregate(&records(), "Egreso");
        assert!(aggregate.get("Trabajo").is_none());

        let income = category_aggregate(&records(), "Ingreso");
        assert_eq!(income.labels(), vec!["Trabajo".to_string()]);
    }

    #[test]
    fn test_entries_are_ordered_by_label() {
        let aggregate = category_aggregate(&records(), "Egreso");
        assert_eq!(
            aggregate.labels(),
            vec!["Comida", "Sin Categoría", "Transporte"]
        );
    }

    #[test]
    fn test_malformed_amounts_are_skipped() {
        let records = vec![malformed(1, "??", "ARS", "Egreso")];
        assert!(category_aggregate(&records, "Egreso").is_empty());
    }

    #[test]
    fn test_unknown_type_gives_empty_aggregate() {
        assert!(category_aggregate(&records(), "Transferencia").is_empty());
        assert!(category_aggregate(&[], "Egreso").is_empty());
    }

    #[test]
    fn test_format_and_export() {
        let report = CategoryReport::generate(&records(), "Egreso");

        let text = report.format_terminal(&NumberLocale::es_ar());
        assert!(text.contains("Categorías (Egreso)"));
        assert!(text.contains("Comida"));
        assert!(text.contains("$ 163,00"));

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("Egreso,Comida,125.00,76.69"));
    }
}
