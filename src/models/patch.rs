//! Typed partial updates for expense records
//!
//! An edit only carries the fields the user changed. The patch is validated
//! on its own, then against the lookup tables by the record store, and only
//! then merged into a copy of the record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::{Amount, ExpenseRecord};
use super::ids::{CategoryId, CurrencyId, PaymentMethodId, TransactionTypeId};
use super::money::Money;

/// Fields of an expense record that may be edited
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpensePatch {
    #[serde(default, rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, rename = "monto", skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,

    #[serde(default, rename = "fecha", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(default, rename = "divisa_id", skip_serializing_if = "Option::is_none")]
    pub currency_id: Option<CurrencyId>,

    #[serde(
        default,
        rename = "tipostransaccion_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_type_id: Option<TransactionTypeId>,

    #[serde(default, rename = "metodopago_id", skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<PaymentMethodId>,

    #[serde(default, rename = "categoria_id", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

impl ExpensePatch {
    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Validate the values carried by the patch
    pub fn validate(&self) -> Result<(), PatchValidationError> {
        if self.is_empty() {
            return Err(PatchValidationError::Empty);
        }

        if let Some(ref description) = self.description {
            if description.trim().is_empty() {
                return Err(PatchValidationError::EmptyDescription);
            }
        }

        if let Some(amount) = self.amount {
            if amount.is_negative() {
                return Err(PatchValidationError::NegativeAmount(amount));
            }
        }

        Ok(())
    }

    /// Return a copy of `record` with the patched fields replaced
    pub fn apply_to(&self, record: &ExpenseRecord) -> ExpenseRecord {
        let mut updated = record.clone();

        if let Some(ref description) = self.description {
            updated.description = description.trim().to_string();
        }
        if let Some(amount) = self.amount {
            updated.amount = Amount::Valid(amount);
        }
        if let Some(date) = self.date {
            updated.date = date;
        }
        if let Some(id) = self.currency_id {
            updated.currency_id = id;
        }
        if let Some(id) = self.transaction_type_id {
            updated.transaction_type_id = id;
        }
        if let Some(id) = self.payment_method_id {
            updated.payment_method_id = id;
        }
        if let Some(id) = self.category_id {
            updated.category_id = id;
        }

        updated
    }
}

/// Validation errors for patches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchValidationError {
    Empty,
    EmptyDescription,
    NegativeAmount(Money),
}

impl fmt::Display for PatchValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Patch does not change any field"),
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::NegativeAmount(amount) => {
                write!(f, "Amount cannot be negative: {}", amount)
            }
        }
    }
}

impl std::error::Error for PatchValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, UserId};

    fn record() -> ExpenseRecord {
        ExpenseRecord::new(
            ExpenseId::new(1),
            UserId::new(1),
            "Almuerzo",
            Money::from_cents(2500),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
    }

    #[test]
    fn test_empty_patch_is_rejected() {
        assert_eq!(
            ExpensePatch::default().validate(),
            Err(PatchValidationError::Empty)
        );
    }

    #[test]
    fn test_blank_description_is_rejected() {
        let patch = ExpensePatch {
            description: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(patch.validate(), Err(PatchValidationError::EmptyDescription));
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let patch = ExpensePatch {
            amount: Some(Money::from_cents(-1)),
            ..Default::default()
        };
        assert!(matches!(
            patch.validate(),
            Err(PatchValidationError::NegativeAmount(_))
        ));
    }

    #[test]
    fn test_apply_only_touches_given_fields() {
        let original = record();
        let patch = ExpensePatch {
            amount: Some(Money::from_cents(3000)),
            category_id: Some(CategoryId::new(8)),
            ..Default::default()
        };
        assert!(patch.validate().is_ok());

        let updated = patch.apply_to(&original);
        assert_eq!(updated.amount, Amount::Valid(Money::from_cents(3000)));
        assert_eq!(updated.category_id, CategoryId::new(8));
        assert_eq!(updated.description, original.description);
        assert_eq!(updated.date, original.date);
        // The source record is left alone
        assert_eq!(original.category_id, CategoryId::new(0));
    }

    #[test]
    fn test_deserialize_partial_patch() {
        let patch: ExpensePatch = serde_json::from_str(r#"{"monto": 12.5}"#).unwrap();
        assert_eq!(patch.amount, Some(Money::from_cents(1250)));
        assert!(patch.description.is_none());
    }
}
