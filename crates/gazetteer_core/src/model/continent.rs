//! Continent record.
//!
//! # Responsibility
//! - Define the root level of the continent → country → region hierarchy.
//!
//! # Invariants
//! - `code` is unique across all continents (storage constraint).
//! - `code` and `name` are never blank in persisted rows.

use super::{is_blank, EntityKind, PlaceId, ValidationError, UNASSIGNED_ID};
use serde::{Deserialize, Serialize};

/// Top-level record of the geographic hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Continent {
    /// Storage-assigned id; `UNASSIGNED_ID` for unsaved candidates.
    pub id: PlaceId,
    /// Short unique code, e.g. `AF`.
    pub code: String,
    /// Display name, e.g. `Africa`.
    pub name: String,
}

impl Continent {
    /// Creates an unsaved candidate; storage assigns the id on insert.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: UNASSIGNED_ID,
            code: code.into(),
            name: name.into(),
        }
    }

    /// Checks required fields in fixed order and reports the first failure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.code) {
            return Err(ValidationError::blank(EntityKind::Continent, "code"));
        }
        if is_blank(&self.name) {
            return Err(ValidationError::blank(EntityKind::Continent, "name"));
        }
        Ok(())
    }
}
