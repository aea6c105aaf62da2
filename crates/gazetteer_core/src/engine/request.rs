//! Closed set of requests accepted by the engine.
//!
//! # Responsibility
//! - Define the presentation-layer → engine boundary as a tagged union,
//!   so dispatch is an exhaustive match with compile-time coverage.

use crate::model::{Entity, EntityKind, PlaceId};
use crate::repo::{ContinentFilter, CountryFilter, RegionFilter};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kind-tagged union over the per-kind search filter sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "filters", rename_all = "snake_case")]
pub enum SearchFilters {
    Continent(ContinentFilter),
    Country(CountryFilter),
    Region(RegionFilter),
}

impl SearchFilters {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Continent(_) => EntityKind::Continent,
            Self::Country(_) => EntityKind::Country,
            Self::Region(_) => EntityKind::Region,
        }
    }
}

/// One discrete user intent, handled to completion before the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "request", rename_all = "snake_case")]
pub enum Request {
    /// Terminate the application.
    Quit,
    /// Open the store at `path`, replacing any previously open store.
    OpenStore { path: PathBuf },
    /// Close the currently open store.
    CloseStore,
    /// Search one entity kind by sparse equality filters.
    StartSearch(SearchFilters),
    /// Load a single record by a previously learned id.
    LoadById { kind: EntityKind, id: PlaceId },
    /// Persist a new record; the store assigns its id.
    SaveNew(Entity),
    /// Persist changes to an existing record, keyed by its id.
    Save(Entity),
}

impl Request {
    /// Stable label for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::OpenStore { .. } => "open_store",
            Self::CloseStore => "close_store",
            Self::StartSearch(_) => "start_search",
            Self::LoadById { .. } => "load_by_id",
            Self::SaveNew(_) => "save_new",
            Self::Save(_) => "save",
        }
    }
}
