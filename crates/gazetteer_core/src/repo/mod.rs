//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts over the gazetteer store.
//! - Isolate SQLite query details from engine orchestration.
//!
//! # Invariants
//! - Write paths validate records before any SQL mutation; a validation
//!   failure means no storage access was attempted.
//! - Constraint failures are classified from SQLite extended result codes,
//!   never from diagnostic message text.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateCode`)
//!   in addition to DB transport errors.

use crate::db::DbError;
use crate::model::{EntityKind, PlaceId, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod continent_repo;
pub mod country_repo;
pub mod region_repo;

pub use continent_repo::{ContinentFilter, ContinentRepository, SqliteContinentRepository};
pub use country_repo::{CountryFilter, CountryRepository, SqliteCountryRepository};
pub use region_repo::{RegionFilter, RegionRepository, SqliteRegionRepository};

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure taxonomy shared by all gazetteer repositories.
#[derive(Debug)]
pub enum RepoError {
    /// A required field failed validation; no SQL ran.
    Validation(ValidationError),
    /// The storage uniqueness constraint on the code column rejected a write.
    DuplicateCode { kind: EntityKind },
    /// A foreign key in the record does not reference an existing row.
    UnknownRelation { kind: EntityKind },
    /// Lookup by id missed; callers only use ids learned from prior loads,
    /// so this signals a caller-contract violation rather than user input.
    NotFound { kind: EntityKind, id: PlaceId },
    /// A persisted row decoded into an invalid record.
    InvalidData(String),
    /// Any other storage fault, diagnostic text passed through.
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateCode { kind } => {
                write!(f, "a {kind} with this code already exists")
            }
            Self::UnknownRelation { kind } => {
                write!(f, "{kind} references a parent row that does not exist")
            }
            Self::NotFound { kind, id } => write!(f, "{kind} not found: id {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted row: {message}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::DuplicateCode { .. }
            | Self::UnknownRelation { .. }
            | Self::NotFound { .. }
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Maps a failed INSERT/UPDATE to the repository taxonomy using SQLite
/// extended result codes.
pub(crate) fn classify_write_error(kind: EntityKind, err: rusqlite::Error) -> RepoError {
    if let rusqlite::Error::SqliteFailure(code, _) = &err {
        match code.extended_code {
            rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE => {
                return RepoError::DuplicateCode { kind };
            }
            rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                return RepoError::UnknownRelation { kind };
            }
            _ => {}
        }
    }
    err.into()
}
