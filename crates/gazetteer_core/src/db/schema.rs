//! Fixed schema bootstrap for brand-new gazetteer stores.
//!
//! # Responsibility
//! - Provision the continent/country/region tables for an empty dataset.
//!
//! # Invariants
//! - Each table carries a UNIQUE constraint on its code column.
//! - Region rows cannot outlive their parent continent/country rows.
//! - This is a one-shot bootstrap, not a migration mechanism; existing
//!   stores are opened without touching their schema.

use super::{open_store, open_store_in_memory, DbResult};
use rusqlite::Connection;
use std::path::Path;

const SCHEMA_SQL: &str = "
CREATE TABLE continent (
    continent_id INTEGER NOT NULL PRIMARY KEY,
    continent_code TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL
);

CREATE TABLE country (
    country_id INTEGER NOT NULL PRIMARY KEY,
    country_code TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    continent_id INTEGER REFERENCES continent(continent_id),
    wikipedia_link TEXT NOT NULL,
    keywords TEXT
);

CREATE TABLE region (
    region_id INTEGER NOT NULL PRIMARY KEY,
    region_code TEXT NOT NULL UNIQUE,
    local_code TEXT NOT NULL,
    name TEXT NOT NULL,
    continent_id INTEGER NOT NULL REFERENCES continent(continent_id),
    country_id INTEGER NOT NULL REFERENCES country(country_id),
    wikipedia_link TEXT,
    keywords TEXT
);
";

/// Applies the fixed gazetteer schema to an open connection.
///
/// Fails if any of the tables already exist.
pub fn initialize_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Creates a new gazetteer store file with an empty schema.
pub fn create_store(path: impl AsRef<Path>) -> DbResult<Connection> {
    let conn = open_store(path)?;
    initialize_schema(&conn)?;
    Ok(conn)
}

/// Creates a new in-memory gazetteer store with an empty schema.
pub fn create_store_in_memory() -> DbResult<Connection> {
    let conn = open_store_in_memory()?;
    initialize_schema(&conn)?;
    Ok(conn)
}
