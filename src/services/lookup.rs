//! Id → description index over a lookup table
//!
//! Resolution is an exact id match restricted to the owning user. A miss is
//! an explicit `Resolved::Unknown`, never an error.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::hash::Hash;

use crate::models::{LookupEntry, UserId};

/// Placeholder for unresolved ids in listings and exports
pub const UNKNOWN_LABEL: &str = "N/A";

/// Placeholder for unresolved categories in category aggregation
pub const UNCATEGORIZED_LABEL: &str = "Sin Categoría";

/// Outcome of resolving a foreign id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resolved {
    Known(String),
    Unknown,
}

impl Resolved {
    /// The description, or `placeholder` when the id did not resolve
    pub fn label_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self {
            Self::Known(description) => description,
            Self::Unknown => placeholder,
        }
    }

    /// The description, or "N/A"
    pub fn label(&self) -> &str {
        self.label_or(UNKNOWN_LABEL)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// True when resolved to exactly this description
    pub fn is(&self, description: &str) -> bool {
        matches!(self, Self::Known(d) if d == description)
    }
}

impl Serialize for Resolved {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(description) => serializer.serialize_some(description),
            Self::Unknown => serializer.serialize_none(),
        }
    }
}

/// Index from id to description for one user's lookup table
#[derive(Debug, Clone)]
pub struct LookupIndex<I> {
    descriptions: HashMap<I, String>,
}

impl<I: Copy + Eq + Hash> LookupIndex<I> {
    /// Build an index over the entries owned by `user_id`
    ///
    /// Entries of other users are left out so their ids never resolve.
    pub fn build(entries: &[LookupEntry<I>], user_id: UserId) -> Self {
        let descriptions = entries
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| (entry.id, entry.description.clone()))
            .collect();

        Self { descriptions }
    }

    pub fn resolve(&self, id: I) -> Resolved {
        match self.descriptions.get(&id) {
            Some(description) => Resolved::Known(description.clone()),
            None => Resolved::Unknown,
        }
    }

    pub fn contains(&self, id: I) -> bool {
        self.descriptions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}
