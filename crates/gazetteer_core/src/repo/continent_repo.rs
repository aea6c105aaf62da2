//! Continent repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide search/load/insert/update APIs over the `continent` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Continent::validate()` before SQL mutations.
//! - Search leaves row order to storage; no ORDER BY is imposed.
//! - Insert does not report the assigned id; callers re-fetch by natural key.

use super::{classify_write_error, RepoError, RepoResult};
use crate::model::{Continent, EntityKind, PlaceId};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use serde::{Deserialize, Serialize};

const CONTINENT_SELECT_SQL: &str = "SELECT
    continent_id,
    continent_code,
    name
FROM continent";

/// Sparse equality predicates for continent search.
///
/// Unset predicates are excluded from the WHERE clause entirely; they do
/// not match NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinentFilter {
    pub code: Option<String>,
    pub name: Option<String>,
}

/// Repository interface for continent persistence operations.
pub trait ContinentRepository {
    /// Returns all rows matching the set predicates, in storage order.
    fn search(&self, filter: &ContinentFilter) -> RepoResult<Vec<Continent>>;
    /// Exact single-row lookup; a miss is a `NotFound` error.
    fn find_by_id(&self, id: PlaceId) -> RepoResult<Continent>;
    /// Validates then inserts; the assigned id is not returned.
    fn insert(&self, candidate: &Continent) -> RepoResult<()>;
    /// Validates then updates all mutable fields keyed by `existing.id`.
    fn update(&self, existing: &Continent) -> RepoResult<()>;
}

/// SQLite-backed continent repository.
pub struct SqliteContinentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContinentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ContinentRepository for SqliteContinentRepository<'_> {
    fn search(&self, filter: &ContinentFilter) -> RepoResult<Vec<Continent>> {
        let mut sql = format!("{CONTINENT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(code) = &filter.code {
            sql.push_str(" AND continent_code = ?");
            bind_values.push(Value::Text(code.clone()));
        }
        if let Some(name) = &filter.name {
            sql.push_str(" AND name = ?");
            bind_values.push(Value::Text(name.clone()));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut continents = Vec::new();

        while let Some(row) = rows.next()? {
            continents.push(parse_continent_row(row)?);
        }

        Ok(continents)
    }

    fn find_by_id(&self, id: PlaceId) -> RepoResult<Continent> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTINENT_SELECT_SQL} WHERE continent_id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => parse_continent_row(row),
            None => Err(RepoError::NotFound {
                kind: EntityKind::Continent,
                id,
            }),
        }
    }

    fn insert(&self, candidate: &Continent) -> RepoResult<()> {
        candidate.validate()?;

        self.conn
            .execute(
                "INSERT INTO continent (continent_code, name) VALUES (?1, ?2);",
                params![candidate.code.as_str(), candidate.name.as_str()],
            )
            .map_err(|err| classify_write_error(EntityKind::Continent, err))?;

        Ok(())
    }

    fn update(&self, existing: &Continent) -> RepoResult<()> {
        existing.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE continent
                 SET
                    continent_code = ?1,
                    name = ?2
                 WHERE continent_id = ?3;",
                params![existing.code.as_str(), existing.name.as_str(), existing.id],
            )
            .map_err(|err| classify_write_error(EntityKind::Continent, err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Continent,
                id: existing.id,
            });
        }

        Ok(())
    }
}

fn parse_continent_row(row: &Row<'_>) -> RepoResult<Continent> {
    let continent = Continent {
        id: row.get("continent_id")?,
        code: row.get("continent_code")?,
        name: row.get("name")?,
    };
    continent
        .validate()
        .map_err(|err| RepoError::InvalidData(err.to_string()))?;
    Ok(continent)
}
