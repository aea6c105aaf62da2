//! Domain model for the gazetteer reference dataset.
//!
//! # Responsibility
//! - Define the canonical continent/country/region records used by core.
//! - Enforce per-record field validation before any persistence write.
//!
//! # Invariants
//! - Every record is identified by a storage-assigned integer `PlaceId`.
//! - Validation reports the first violated rule only, in a fixed field
//!   order per kind: code-like fields, then name, then required links.
//! - Records returned by the persistence layer are value snapshots; the
//!   model never holds a live handle into storage state.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod continent;
pub mod country;
pub mod region;

pub use continent::Continent;
pub use country::Country;
pub use region::Region;

/// Storage-assigned integer identifier shared by all entity kinds.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PlaceId = i64;

/// Placeholder id carried by candidates that have not been persisted yet.
///
/// Insert paths never read a candidate's id; storage assigns the real one.
pub const UNASSIGNED_ID: PlaceId = 0;

/// The three record kinds managed by the gazetteer store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Continent,
    Country,
    Region,
}

impl EntityKind {
    /// Lowercase noun used in log lines and user-facing messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Continent => "continent",
            Self::Country => "country",
            Self::Region => "region",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-tagged union over the three record types.
///
/// This is the payload shape exchanged with the presentation layer; the
/// tag keeps the wire form self-describing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum Entity {
    Continent(Continent),
    Country(Country),
    Region(Region),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Continent(_) => EntityKind::Continent,
            Self::Country(_) => EntityKind::Country,
            Self::Region(_) => EntityKind::Region,
        }
    }

    /// Returns the record's storage-assigned id (or `UNASSIGNED_ID` for
    /// not-yet-persisted candidates).
    pub fn id(&self) -> PlaceId {
        match self {
            Self::Continent(continent) => continent.id,
            Self::Country(country) => country.id,
            Self::Region(region) => region.id,
        }
    }
}

/// First violated field rule for a record, reported before any SQL runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: EntityKind,
    pub field: &'static str,
}

impl ValidationError {
    pub(crate) fn blank(kind: EntityKind, field: &'static str) -> Self {
        Self { kind, field }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} must not be empty or whitespace",
            self.kind, self.field
        )
    }
}

impl Error for ValidationError {}

/// Blank means empty after trimming whitespace.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
