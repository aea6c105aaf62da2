//! Region record.
//!
//! # Invariants
//! - `code` is unique across all regions (storage constraint).
//! - `code`, `local_code` and `name` are never blank in persisted rows.
//! - `continent_id` and `country_id` always reference existing rows
//!   (storage foreign-key enforcement; no orphaned regions).

use super::{is_blank, EntityKind, PlaceId, ValidationError, UNASSIGNED_ID};
use serde::{Deserialize, Serialize};

/// Leaf record of the geographic hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Storage-assigned id; `UNASSIGNED_ID` for unsaved candidates.
    pub id: PlaceId,
    /// Unique code, e.g. `JP-13`.
    pub code: String,
    /// Local administrative code, unique only within its country.
    pub local_code: String,
    /// Display name, e.g. `Tokyo`.
    pub name: String,
    /// Required parent continent reference.
    pub continent_id: PlaceId,
    /// Required parent country reference.
    pub country_id: PlaceId,
    /// Optional reference link for the region.
    pub wikipedia_link: Option<String>,
    /// Optional free-form search keywords.
    pub keywords: Option<String>,
}

impl Region {
    /// Creates an unsaved candidate; storage assigns the id on insert.
    pub fn new(
        code: impl Into<String>,
        local_code: impl Into<String>,
        name: impl Into<String>,
        continent_id: PlaceId,
        country_id: PlaceId,
    ) -> Self {
        Self {
            id: UNASSIGNED_ID,
            code: code.into(),
            local_code: local_code.into(),
            name: name.into(),
            continent_id,
            country_id,
            wikipedia_link: None,
            keywords: None,
        }
    }

    /// Checks required fields in fixed order and reports the first failure.
    ///
    /// `continent_id` and `country_id` are required but cannot be absent by
    /// construction; dangling references are rejected by storage foreign-key
    /// enforcement instead.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.code) {
            return Err(ValidationError::blank(EntityKind::Region, "code"));
        }
        if is_blank(&self.local_code) {
            return Err(ValidationError::blank(EntityKind::Region, "local_code"));
        }
        if is_blank(&self.name) {
            return Err(ValidationError::blank(EntityKind::Region, "name"));
        }
        Ok(())
    }
}
