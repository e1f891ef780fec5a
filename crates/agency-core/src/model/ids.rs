//! Store-assigned identifiers and optional foreign keys
//!
//! The persisted layout keeps `0` as the "unset" sentinel for foreign-key
//! columns. Inside the model an unset reference is `None`, so an `EntityId`
//! is always a real, positive row id.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Positive integer row id assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(i64);

impl EntityId {
    /// Wrap a raw id; `None` for the unset sentinel or anything non-positive
    pub fn new(raw: i64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    /// Wrap an id read back from a primary-key column or generated by the store
    pub fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw integer value
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Encode an optional reference for a foreign-key column
pub fn fk_to_column(id: Option<EntityId>) -> i64 {
    id.map(EntityId::get).unwrap_or(0)
}

/// Decode a foreign-key column; `0` (or NULL read as 0) means unset
pub fn fk_from_column(raw: i64) -> Option<EntityId> {
    EntityId::new(raw)
}
