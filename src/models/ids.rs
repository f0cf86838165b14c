//! Strongly-typed ID wrappers for all entity types
//!
//! The backend hands out integer ids per table. Wrapping them in newtypes
//! prevents accidentally comparing a category id against a currency id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create an ID from the raw backend value
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Get the raw backend value
            pub const fn value(&self) -> i64 {
                self.0
            }

            /// Parse an ID, accepting an optional type prefix (e.g. "cat-3")
            pub fn parse(s: &str) -> Result<Self, ParseIntError> {
                s.parse()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(ExpenseId, "gasto-");
define_id!(CategoryId, "cat-");
define_id!(PaymentMethodId, "mp-");
define_id!(TransactionTypeId, "tt-");
define_id!(CurrencyId, "div-");
define_id!(UserId, "usr-");
