//! Country repository contract and SQLite implementation.
//!
//! # Invariants
//! - Write paths call `Country::validate()` before SQL mutations.
//! - Search leaves row order to storage; no ORDER BY is imposed.
//! - `continent_id` is nullable; NULL is preserved through round-trips.

use super::{classify_write_error, RepoError, RepoResult};
use crate::model::{Country, EntityKind, PlaceId};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use serde::{Deserialize, Serialize};

const COUNTRY_SELECT_SQL: &str = "SELECT
    country_id,
    country_code,
    name,
    continent_id,
    wikipedia_link,
    keywords
FROM country";

/// Sparse equality predicates for country search.
///
/// Unset predicates are excluded from the WHERE clause entirely; they do
/// not match NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryFilter {
    pub code: Option<String>,
    pub name: Option<String>,
}

/// Repository interface for country persistence operations.
pub trait CountryRepository {
    /// Returns all rows matching the set predicates, in storage order.
    fn search(&self, filter: &CountryFilter) -> RepoResult<Vec<Country>>;
    /// Exact single-row lookup; a miss is a `NotFound` error.
    fn find_by_id(&self, id: PlaceId) -> RepoResult<Country>;
    /// Validates then inserts; the assigned id is not returned.
    fn insert(&self, candidate: &Country) -> RepoResult<()>;
    /// Validates then updates all mutable fields keyed by `existing.id`.
    fn update(&self, existing: &Country) -> RepoResult<()>;
}

/// SQLite-backed country repository.
pub struct SqliteCountryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCountryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CountryRepository for SqliteCountryRepository<'_> {
    fn search(&self, filter: &CountryFilter) -> RepoResult<Vec<Country>> {
        let mut sql = format!("{COUNTRY_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(code) = &filter.code {
            sql.push_str(" AND country_code = ?");
            bind_values.push(Value::Text(code.clone()));
        }
        if let Some(name) = &filter.name {
            sql.push_str(" AND name = ?");
            bind_values.push(Value::Text(name.clone()));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut countries = Vec::new();

        while let Some(row) = rows.next()? {
            countries.push(parse_country_row(row)?);
        }

        Ok(countries)
    }

    fn find_by_id(&self, id: PlaceId) -> RepoResult<Country> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COUNTRY_SELECT_SQL} WHERE country_id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => parse_country_row(row),
            None => Err(RepoError::NotFound {
                kind: EntityKind::Country,
                id,
            }),
        }
    }

    fn insert(&self, candidate: &Country) -> RepoResult<()> {
        candidate.validate()?;

        self.conn
            .execute(
                "INSERT INTO country (
                    country_code,
                    name,
                    continent_id,
                    wikipedia_link,
                    keywords
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    candidate.code.as_str(),
                    candidate.name.as_str(),
                    candidate.continent_id,
                    candidate.wikipedia_link.as_str(),
                    candidate.keywords.as_deref(),
                ],
            )
            .map_err(|err| classify_write_error(EntityKind::Country, err))?;

        Ok(())
    }

    fn update(&self, existing: &Country) -> RepoResult<()> {
        existing.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE country
                 SET
                    country_code = ?1,
                    name = ?2,
                    continent_id = ?3,
                    wikipedia_link = ?4,
                    keywords = ?5
                 WHERE country_id = ?6;",
                params![
                    existing.code.as_str(),
                    existing.name.as_str(),
                    existing.continent_id,
                    existing.wikipedia_link.as_str(),
                    existing.keywords.as_deref(),
                    existing.id,
                ],
            )
            .map_err(|err| classify_write_error(EntityKind::Country, err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Country,
                id: existing.id,
            });
        }

        Ok(())
    }
}

fn parse_country_row(row: &Row<'_>) -> RepoResult<Country> {
    let country = Country {
        id: row.get("country_id")?,
        code: row.get("country_code")?,
        name: row.get("name")?,
        continent_id: row.get("continent_id")?,
        wikipedia_link: row.get("wikipedia_link")?,
        keywords: row.get("keywords")?,
    };
    country
        .validate()
        .map_err(|err| RepoError::InvalidData(err.to_string()))?;
    Ok(country)
}
