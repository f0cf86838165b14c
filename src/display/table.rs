//! Listing table for enriched records

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::format::{currency_symbol, format_amount, format_date, NumberLocale};
use crate::models::Amount;
use crate::services::EnrichedRecord;

const DESCRIPTION_WIDTH: usize = 32;

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Descripción")]
    description: String,
    #[tabled(rename = "Monto")]
    amount: String,
    #[tabled(rename = "Fecha")]
    date: String,
    #[tabled(rename = "Divisa")]
    currency: String,
    #[tabled(rename = "Tipo")]
    transaction_type: String,
    #[tabled(rename = "Método de Pago")]
    payment_method: String,
    #[tabled(rename = "Categoría")]
    category: String,
}

impl RecordRow {
    fn new(enriched: &EnrichedRecord, locale: &NumberLocale) -> Self {
        let record = &enriched.record;
        let currency = enriched.currency.label();

        let amount = match &record.amount {
            Amount::Valid(money) => {
                let locale = locale.clone().with_symbol(currency_symbol(currency));
                format_amount(*money, &locale)
            }
            Amount::Malformed(raw) => format!("¿{}?", raw),
        };

        Self {
            id: record.id.to_string(),
            description: truncate(&record.description, DESCRIPTION_WIDTH),
            amount,
            date: format_date(record.date),
            currency: currency.to_string(),
            transaction_type: enriched.transaction_type.label().to_string(),
            payment_method: enriched.payment_method.label().to_string(),
            category: enriched.category.label().to_string(),
        }
    }
}

/// Format an enriched listing as a table
pub fn format_record_table(records: &[EnrichedRecord], locale: &NumberLocale) -> String {
    if records.is_empty() {
        return "No se encontraron gastos.\n".to_string();
    }

    let rows: Vec<RecordRow> = records.iter().map(|r| RecordRow::new(r, locale)).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());

    format!("{}\n{} registro(s)\n", table, records.len())
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::enrichment::fixtures::{date, enriched, malformed};

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Categoría", 9), "Categoría");
        assert_eq!(truncate("Peluquería", 8), "Peluq...");
    }

    #[test]
    fn test_table_contains_resolved_labels() {
        let records = vec![
            enriched(1, "Supermercado", 152075, date(2024, 1, 15), "ARS", "Egreso", Some("Comida")),
            enriched(2, "Dólares", 10000, date(2024, 1, 16), "USD", "Ingreso", None),
        ];

        let output = format_record_table(&records, &NumberLocale::es_ar());
        assert!(output.contains("Supermercado"));
        assert!(output.contains("$ 1.520,75"));
        assert!(output.contains("US$ 100,00"));
        assert!(output.contains("15/01/2024"));
        assert!(output.contains("Comida"));
        assert!(output.contains("N/A"));
        assert!(output.contains("2 registro(s)"));
    }

    #[test]
    fn test_malformed_amount_is_shown_raw() {
        let output = format_record_table(&[malformed(1, "doce", "ARS", "Egreso")], &NumberLocale::es_ar());
        assert!(output.contains("¿doce?"));
    }

    #[test]
    fn test_empty_listing() {
        assert!(format_record_table(&[], &NumberLocale::es_ar()).contains("No se encontraron"));
    }
}
