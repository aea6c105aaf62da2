//! Request-dispatch engine for the gazetteer editor backend.
//!
//! # Responsibility
//! - Interpret one request at a time and map it to persistence calls.
//! - Emit a finite sequence of outcomes per request, fully materialized
//!   before control returns to the caller.
//!
//! # Invariants
//! - The engine owns the only live store handle; opening a store replaces
//!   any previous handle wholesale.
//! - A failing request never terminates the engine: unexpected errors are
//!   caught at the dispatch boundary and reported as one `Outcome::Error`.
//! - Expected save failures (validation, duplicate code, unknown relation)
//!   surface as `Outcome::SaveFailed`, never as `Outcome::Error`.

use crate::db::{self, is_valid_store};
use crate::model::{Entity, EntityKind, PlaceId};
use crate::repo::{
    ContinentFilter, ContinentRepository, CountryFilter, CountryRepository, RegionFilter,
    RegionRepository, RepoError, SqliteContinentRepository, SqliteCountryRepository,
    SqliteRegionRepository,
};
use log::{debug, error, info};
use rusqlite::Connection;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod outcome;
pub mod request;

pub use outcome::Outcome;
pub use request::{Request, SearchFilters};

/// Processes requests against the currently open gazetteer store.
///
/// Single-threaded and synchronous: each request runs to completion,
/// including all storage calls and emitted outcomes, before the next one
/// is accepted.
pub struct Engine {
    store: Option<StoreHandle>,
}

struct StoreHandle {
    path: PathBuf,
    conn: Connection,
}

/// Internal dispatch failure, converted to `Outcome::Error` at the boundary.
#[derive(Debug)]
enum EngineError {
    NoOpenStore,
    Inconsistent(&'static str),
    Repo(RepoError),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoOpenStore => write!(f, "no store is open"),
            Self::Inconsistent(details) => write!(f, "inconsistent store state: {details}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl From<RepoError> for EngineError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl Engine {
    /// Creates an engine with no open store.
    pub fn new() -> Self {
        Self { store: None }
    }

    /// Handles one request and returns every outcome it produced.
    ///
    /// Never panics on a bad request; any error not already translated
    /// into a structured outcome is reported as a single `Outcome::Error`
    /// and the engine stays ready for the next request.
    pub fn handle(&mut self, request: Request) -> Vec<Outcome> {
        let label = request.label();
        match self.dispatch(request) {
            Ok(outcomes) => {
                debug!(
                    "event=request_dispatch module=engine request={label} status=ok outcomes={}",
                    outcomes.len()
                );
                outcomes
            }
            Err(err) => {
                error!(
                    "event=request_dispatch module=engine request={label} status=error error={err}"
                );
                vec![Outcome::Error {
                    message: err.to_string(),
                }]
            }
        }
    }

    fn dispatch(&mut self, request: Request) -> Result<Vec<Outcome>, EngineError> {
        match request {
            Request::Quit => Ok(vec![Outcome::EndApplication]),
            Request::OpenStore { path } => Ok(self.open_store(path)),
            Request::CloseStore => {
                if let Some(handle) = self.store.take() {
                    info!(
                        "event=store_close module=engine status=ok path={}",
                        handle.path.display()
                    );
                }
                Ok(vec![Outcome::StoreClosed])
            }
            Request::StartSearch(filters) => self.run_search(filters),
            Request::LoadById { kind, id } => self.load_by_id(kind, id),
            Request::SaveNew(entity) => self.save_new(entity),
            Request::Save(entity) => self.save_existing(entity),
        }
    }

    /// Opens and sniffs a store; on any failure the engine is left with no
    /// open store, so later requests report errors until a successful open.
    fn open_store(&mut self, path: PathBuf) -> Vec<Outcome> {
        self.store = None;

        let conn = match db::open_store(&path) {
            Ok(conn) => conn,
            Err(err) => {
                return vec![Outcome::StoreOpenFailed {
                    message: format!("could not open store at `{}`: {err}", path.display()),
                }];
            }
        };

        if is_valid_store(&conn) {
            self.store = Some(StoreHandle {
                path: path.clone(),
                conn,
            });
            vec![Outcome::StoreOpened { path }]
        } else {
            vec![Outcome::StoreOpenFailed {
                message: format!(
                    "wrong file was opened: `{}` does not contain a continent table",
                    path.display()
                ),
            }]
        }
    }

    fn open_handle(&self) -> Result<&StoreHandle, EngineError> {
        self.store.as_ref().ok_or(EngineError::NoOpenStore)
    }

    /// Emits one `SearchResult` per match; zero matches emit nothing.
    fn run_search(&self, filters: SearchFilters) -> Result<Vec<Outcome>, EngineError> {
        let handle = self.open_handle()?;

        let matches: Vec<Entity> = match filters {
            SearchFilters::Continent(filter) => SqliteContinentRepository::new(&handle.conn)
                .search(&filter)?
                .into_iter()
                .map(Entity::Continent)
                .collect(),
            SearchFilters::Country(filter) => SqliteCountryRepository::new(&handle.conn)
                .search(&filter)?
                .into_iter()
                .map(Entity::Country)
                .collect(),
            SearchFilters::Region(filter) => SqliteRegionRepository::new(&handle.conn)
                .search(&filter)?
                .into_iter()
                .map(Entity::Region)
                .collect(),
        };

        Ok(matches.into_iter().map(Outcome::SearchResult).collect())
    }

    fn load_by_id(&self, kind: EntityKind, id: PlaceId) -> Result<Vec<Outcome>, EngineError> {
        let handle = self.open_handle()?;

        let entity = match kind {
            EntityKind::Continent => {
                Entity::Continent(SqliteContinentRepository::new(&handle.conn).find_by_id(id)?)
            }
            EntityKind::Country => {
                Entity::Country(SqliteCountryRepository::new(&handle.conn).find_by_id(id)?)
            }
            EntityKind::Region => {
                Entity::Region(SqliteRegionRepository::new(&handle.conn).find_by_id(id)?)
            }
        };

        Ok(vec![Outcome::Loaded(entity)])
    }

    /// Inserts a candidate, then re-fetches it by its natural key to learn
    /// the storage-assigned id.
    ///
    /// The re-fetch takes the first match. The unique `code` leads every
    /// natural key, which pins the row as long as the store is not mutated
    /// externally between the insert and the re-fetch.
    fn save_new(&self, entity: Entity) -> Result<Vec<Outcome>, EngineError> {
        let handle = self.open_handle()?;
        let kind = entity.kind();

        let refetched = match entity {
            Entity::Continent(candidate) => {
                let repo = SqliteContinentRepository::new(&handle.conn);
                match repo.insert(&candidate) {
                    Ok(()) => {
                        let filter = ContinentFilter {
                            code: Some(candidate.code),
                            name: Some(candidate.name),
                        };
                        repo.search(&filter)?.into_iter().next().map(Entity::Continent)
                    }
                    Err(err) => return Ok(vec![save_failed(kind, err)]),
                }
            }
            Entity::Country(candidate) => {
                let repo = SqliteCountryRepository::new(&handle.conn);
                match repo.insert(&candidate) {
                    Ok(()) => {
                        let filter = CountryFilter {
                            code: Some(candidate.code),
                            name: Some(candidate.name),
                        };
                        repo.search(&filter)?.into_iter().next().map(Entity::Country)
                    }
                    Err(err) => return Ok(vec![save_failed(kind, err)]),
                }
            }
            Entity::Region(candidate) => {
                let repo = SqliteRegionRepository::new(&handle.conn);
                match repo.insert(&candidate) {
                    Ok(()) => {
                        let filter = RegionFilter {
                            code: Some(candidate.code),
                            local_code: Some(candidate.local_code),
                            name: Some(candidate.name),
                        };
                        repo.search(&filter)?.into_iter().next().map(Entity::Region)
                    }
                    Err(err) => return Ok(vec![save_failed(kind, err)]),
                }
            }
        };

        let saved = refetched.ok_or(EngineError::Inconsistent(
            "saved record could not be re-read by its natural key",
        ))?;
        Ok(vec![Outcome::Saved(saved)])
    }

    /// Updates an existing record in place; identity does not change, so
    /// success echoes the input record.
    fn save_existing(&self, entity: Entity) -> Result<Vec<Outcome>, EngineError> {
        let handle = self.open_handle()?;
        let kind = entity.kind();

        let result = match &entity {
            Entity::Continent(existing) => {
                SqliteContinentRepository::new(&handle.conn).update(existing)
            }
            Entity::Country(existing) => SqliteCountryRepository::new(&handle.conn).update(existing),
            Entity::Region(existing) => SqliteRegionRepository::new(&handle.conn).update(existing),
        };

        match result {
            Ok(()) => Ok(vec![Outcome::Saved(entity)]),
            Err(err) => Ok(vec![save_failed(kind, err)]),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

fn save_failed(kind: EntityKind, err: RepoError) -> Outcome {
    Outcome::SaveFailed {
        kind,
        message: err.to_string(),
    }
}
