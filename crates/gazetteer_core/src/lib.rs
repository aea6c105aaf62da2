//! Core engine and persistence layer for the gazetteer editor.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod engine;
pub mod logging;
pub mod model;
pub mod repo;

pub use engine::{Engine, Outcome, Request, SearchFilters};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{
    Continent, Country, Entity, EntityKind, PlaceId, Region, ValidationError, UNASSIGNED_ID,
};
pub use repo::{
    ContinentFilter, ContinentRepository, CountryFilter, CountryRepository, RegionFilter,
    RegionRepository, RepoError, RepoResult, SqliteContinentRepository, SqliteCountryRepository,
    SqliteRegionRepository,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
