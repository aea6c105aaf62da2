//! Country record.
//!
//! # Invariants
//! - `code` is unique across all countries (storage constraint).
//! - `code`, `name` and `wikipedia_link` are never blank in persisted rows.
//! - `continent_id`, when set, references an existing continent row
//!   (storage foreign-key enforcement).

use super::{is_blank, EntityKind, PlaceId, ValidationError, UNASSIGNED_ID};
use serde::{Deserialize, Serialize};

/// Mid-level record of the geographic hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Storage-assigned id; `UNASSIGNED_ID` for unsaved candidates.
    pub id: PlaceId,
    /// Unique code, e.g. `JP`.
    pub code: String,
    /// Display name, e.g. `Japan`.
    pub name: String,
    /// Optional parent continent reference.
    pub continent_id: Option<PlaceId>,
    /// Required reference link for the country.
    pub wikipedia_link: String,
    /// Optional free-form search keywords.
    pub keywords: Option<String>,
}

impl Country {
    /// Creates an unsaved candidate; storage assigns the id on insert.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        wikipedia_link: impl Into<String>,
    ) -> Self {
        Self {
            id: UNASSIGNED_ID,
            code: code.into(),
            name: name.into(),
            continent_id: None,
            wikipedia_link: wikipedia_link.into(),
            keywords: None,
        }
    }

    /// Checks required fields in fixed order and reports the first failure.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.code) {
            return Err(ValidationError::blank(EntityKind::Country, "code"));
        }
        if is_blank(&self.name) {
            return Err(ValidationError::blank(EntityKind::Country, "name"));
        }
        if is_blank(&self.wikipedia_link) {
            return Err(ValidationError::blank(EntityKind::Country, "wikipedia_link"));
        }
        Ok(())
    }
}
