//! Region repository contract and SQLite implementation.
//!
//! # Invariants
//! - Write paths call `Region::validate()` before SQL mutations.
//! - Search leaves row order to storage; no ORDER BY is imposed.
//! - Foreign-key enforcement on the connection rejects writes whose
//!   `continent_id`/`country_id` do not reference existing rows.

use super::{classify_write_error, RepoError, RepoResult};
use crate::model::{EntityKind, PlaceId, Region};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use serde::{Deserialize, Serialize};

const REGION_SELECT_SQL: &str = "SELECT
    region_id,
    region_code,
    local_code,
    name,
    continent_id,
    country_id,
    wikipedia_link,
    keywords
FROM region";

/// Sparse equality predicates for region search.
///
/// Unset predicates are excluded from the WHERE clause entirely; they do
/// not match NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionFilter {
    pub code: Option<String>,
    pub local_code: Option<String>,
    pub name: Option<String>,
}

/// Repository interface for region persistence operations.
pub trait RegionRepository {
    /// Returns all rows matching the set predicates, in storage order.
    fn search(&self, filter: &RegionFilter) -> RepoResult<Vec<Region>>;
    /// Exact single-row lookup; a miss is a `NotFound` error.
    fn find_by_id(&self, id: PlaceId) -> RepoResult<Region>;
    /// Validates then inserts; the assigned id is not returned.
    fn insert(&self, candidate: &Region) -> RepoResult<()>;
    /// Validates then updates all mutable fields keyed by `existing.id`.
    fn update(&self, existing: &Region) -> RepoResult<()>;
}

/// SQLite-backed region repository.
pub struct SqliteRegionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRegionRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RegionRepository for SqliteRegionRepository<'_> {
    fn search(&self, filter: &RegionFilter) -> RepoResult<Vec<Region>> {
        let mut sql = format!("{REGION_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(code) = &filter.code {
            sql.push_str(" AND region_code = ?");
            bind_values.push(Value::Text(code.clone()));
        }
        if let Some(local_code) = &filter.local_code {
            sql.push_str(" AND local_code = ?");
            bind_values.push(Value::Text(local_code.clone()));
        }
        if let Some(name) = &filter.name {
            sql.push_str(" AND name = ?");
            bind_values.push(Value::Text(name.clone()));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut regions = Vec::new();

        while let Some(row) = rows.next()? {
            regions.push(parse_region_row(row)?);
        }

        Ok(regions)
    }

    fn find_by_id(&self, id: PlaceId) -> RepoResult<Region> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REGION_SELECT_SQL} WHERE region_id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => parse_region_row(row),
            None => Err(RepoError::NotFound {
                kind: EntityKind::Region,
                id,
            }),
        }
    }

    fn insert(&self, candidate: &Region) -> RepoResult<()> {
        candidate.validate()?;

        self.conn
            .execute(
                "INSERT INTO region (
                    region_code,
                    local_code,
                    name,
                    continent_id,
                    country_id,
                    wikipedia_link,
                    keywords
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                params![
                    candidate.code.as_str(),
                    candidate.local_code.as_str(),
                    candidate.name.as_str(),
                    candidate.continent_id,
                    candidate.country_id,
                    candidate.wikipedia_link.as_deref(),
                    candidate.keywords.as_deref(),
                ],
            )
            .map_err(|err| classify_write_error(EntityKind::Region, err))?;

        Ok(())
    }

    fn update(&self, existing: &Region) -> RepoResult<()> {
        existing.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE region
                 SET
                    region_code = ?1,
                    local_code = ?2,
                    name = ?3,
                    continent_id = ?4,
                    country_id = ?5,
                    wikipedia_link = ?6,
                    keywords = ?7
                 WHERE region_id = ?8;",
                params![
                    existing.code.as_str(),
                    existing.local_code.as_str(),
                    existing.name.as_str(),
                    existing.continent_id,
                    existing.country_id,
                    existing.wikipedia_link.as_deref(),
                    existing.keywords.as_deref(),
                    existing.id,
                ],
            )
            .map_err(|err| classify_write_error(EntityKind::Region, err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Region,
                id: existing.id,
            });
        }

        Ok(())
    }
}

fn parse_region_row(row: &Row<'_>) -> RepoResult<Region> {
    let region = Region {
        id: row.get("region_id")?,
        code: row.get("region_code")?,
        local_code: row.get("local_code")?,
        name: row.get("name")?,
        continent_id: row.get("continent_id")?,
        country_id: row.get("country_id")?,
        wikipedia_link: row.get("wikipedia_link")?,
        keywords: row.get("keywords")?,
    };
    region
        .validate()
        .map_err(|err| RepoError::InvalidData(err.to_string()))?;
    Ok(region)
}
