//! SQLite store bootstrap for the gazetteer dataset.
//!
//! # Responsibility
//! - Open and configure SQLite connections to gazetteer store files.
//! - Distinguish a real gazetteer dataset from an arbitrary file.
//! - Provision the fixed schema for brand-new datasets.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - The store sniff never raises; malformed files report as invalid.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{is_valid_store, open_store, open_store_in_memory};
pub use schema::{create_store, create_store_in_memory, initialize_schema};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
