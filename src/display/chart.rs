//! Chart-ready series
//!
//! Turns aggregates into label/value series and renders them as horizontal
//! bars for the terminal. Colors are assigned from a fixed palette in label
//! order, so the same labels always get the same colors.

use serde::Serialize;

use super::format::{format_amount, format_date, NumberLocale};
use crate::models::Money;
use crate::reports::{CategoryAggregate, MonthlyAggregate};
use crate::services::EnrichedRecord;

/// Fill colors, cycled in label order
pub const PALETTE: [&str; 8] = [
    "rgba(75, 192, 192, 0.6)",
    "rgba(255, 99, 132, 0.6)",
    "rgba(54, 162, 235, 0.6)",
    "rgba(255, 206, 86, 0.6)",
    "rgba(153, 102, 255, 0.6)",
    "rgba(255, 159, 64, 0.6)",
    "rgba(201, 203, 207, 0.6)",
    "rgba(100, 181, 90, 0.6)",
];

/// Terminal color for each palette slot
const ANSI_PALETTE: [&str; 8] = [
    "\x1b[36m", "\x1b[31m", "\x1b[34m", "\x1b[33m", "\x1b[35m", "\x1b[91m", "\x1b[37m",
    "\x1b[32m",
];

const ANSI_RESET: &str = "\x1b[0m";

/// One dataset over a list of labels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub labels: Vec<String>,
    pub values: Vec<Money>,
}

impl ChartSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: Money) {
        self.labels.push(label.into());
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Largest value, or zero for an empty series
    pub fn max_value(&self) -> Money {
        self.values.iter().copied().max().unwrap_or_default()
    }

    /// Label and color per point
    pub fn colors(&self) -> Vec<(String, &'static str)> {
        assign_colors(&self.labels)
    }

    /// Render as horizontal bars, one line per label
    pub fn render(&self, locale: &NumberLocale, width: usize, colored: bool) -> String {
        let mut output = String::new();
        output.push_str(&self.name);
        output.push('\n');

        if self.is_empty() {
            output.push_str("  (sin datos)\n");
            return output;
        }

        let label_width = self.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let max = self.max_value().cents() as f64;

        for (i, (label, value)) in self.labels.iter().zip(&self.values).enumerate() {
            let bar = format_bar(value.cents() as f64, max, width);
            let bar = if colored {
                format!("{}{}{}", ANSI_PALETTE[i % ANSI_PALETTE.len()], bar, ANSI_RESET)
            } else {
                bar
            };
            output.push_str(&format!(
                "  {:<label_width$} {} {}\n",
                label,
                bar,
                format_amount(*value, locale),
                label_width = label_width
            ));
        }

        output
    }
}

/// Income and expense datasets sharing the month labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyChart {
    pub income: ChartSeries,
    pub expense: ChartSeries,
}

/// Monthly income and expense series, in aggregate order
pub fn monthly_series(months: &[MonthlyAggregate]) -> MonthlyChart {
    let mut income = ChartSeries::new("Ingresos");
    let mut expense = ChartSeries::new("Egresos");

    for month in months {
        income.push(month.month_label.clone(), month.income_total);
        expense.push(month.month_label.clone(), month.expense_total);
    }

    MonthlyChart { income, expense }
}

/// One point per category, in label order
pub fn category_series(aggregate: &CategoryAggregate) -> ChartSeries {
    let mut series = ChartSeries::new(format!("Categorías ({})", aggregate.transaction_type));
    for (label, total) in aggregate.iter() {
        series.push(label, total);
    }
    series
}

/// One point per record: its amount over its formatted date
///
/// Records with malformed amounts have no point.
pub fn amount_series(records: &[EnrichedRecord]) -> ChartSeries {
    let mut series = ChartSeries::new("Montos");
    for enriched in records {
        if let Some(amount) = enriched.record.amount.value() {
            series.push(format_date(enriched.record.date), amount);
        }
    }
    series
}

/// Pair each label with a palette color, cycling when labels outnumber colors
pub fn assign_colors<S: AsRef<str>>(labels: &[S]) -> Vec<(String, &'static str)> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| (label.as_ref().to_string(), PALETTE[i % PALETTE.len()]))
        .collect()
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{category_aggregate, monthly_aggregate};
    use crate::services::enrichment::fixtures::{date, enriched, malformed};

    fn records() -> Vec<EnrichedRecord> {
        vec![
            enriched(1, "a", 3000, date(2024, 2, 3), "ARS", "Egreso", Some("Comida")),
            enriched(2, "b", 7000, date(2024, 1, 25), "ARS", "Ingreso", Some("Trabajo")),
            enriched(3, "c", 1000, date(2024, 2, 9), "ARS", "Egreso", Some("Auto")),
        ]
    }

    #[test]
    fn test_monthly_series_follows_aggregate_order() {
        let chart = monthly_series(&monthly_aggregate(&records()));
        assert_eq!(chart.income.labels, vec!["Enero 2024", "Febrero 2024"]);
        assert_eq!(chart.income.labels, chart.expense.labels);
        assert_eq!(
            chart.income.values,
            vec![Money::from_cents(7000), Money::zero()]
        );
        assert_eq!(
            chart.expense.values,
            vec![Money::zero(), Money::from_cents(4000)]
        );
    }

    #[test]
    fn test_category_series() {
        let series = category_series(&category_aggregate(&records(), "Egreso"));
        assert_eq!(series.labels, vec!["Auto", "Comida"]);
        assert_eq!(series.max_value(), Money::from_cents(3000));
    }

    #[test]
    fn test_amount_series_uses_formatted_dates() {
        let mut records = records();
        records.push(malformed(4, "?", "ARS", "Egreso"));

        let series = amount_series(&records);
        assert_eq!(series.len(), 3);
        assert_eq!(series.labels[0], "03/02/2024");
        assert_eq!(series.values[1], Money::from_cents(7000));
    }

    #[test]
    fn test_assign_colors_is_deterministic_and_cycles() {
        let labels: Vec<String> = (0..10).map(|i| format!("c{}", i)).collect();
        let colors = assign_colors(&labels);
        assert_eq!(colors, assign_colors(&labels));
        assert_eq!(colors[0].1, PALETTE[0]);
        assert_eq!(colors[8].1, PALETTE[0]);
        assert_eq!(colors[9], ("c9".to_string(), PALETTE[1]));
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(0.0, 100.0, 4), "    ");
    }

    #[test]
    fn test_render_plain() {
        let series = category_series(&category_aggregate(&records(), "Egreso"));
        let output = series.render(&NumberLocale::es_ar(), 10, false);
        assert!(output.starts_with("Categorías (Egreso)\n"));
        assert!(output.contains("Comida ██████████ $ 30,00"));
        assert!(!output.contains('\x1b'));

        let empty = ChartSeries::new("Montos").render(&NumberLocale::es_ar(), 10, false);
        assert!(empty.contains("sin datos"));
    }
}
