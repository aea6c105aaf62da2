//! Closed set of outcomes emitted by the engine.
//!
//! # Responsibility
//! - Define the engine → presentation-layer boundary. Every outcome is a
//!   self-contained notification; the engine never pushes unprompted.

use crate::model::{Entity, EntityKind};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One structured notification produced while handling a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The application should terminate.
    EndApplication,
    /// The store at `path` is open and recognized as a gazetteer dataset.
    StoreOpened { path: PathBuf },
    /// The store could not be opened, or is not a gazetteer dataset.
    StoreOpenFailed { message: String },
    /// The store has been closed.
    StoreClosed,
    /// One record matching an in-progress search.
    SearchResult(Entity),
    /// The record requested by id.
    Loaded(Entity),
    /// A record was persisted; carries its storage-assigned id.
    Saved(Entity),
    /// A save was rejected; `message` names the violated rule.
    SaveFailed { kind: EntityKind, message: String },
    /// A request failed outside the expected failure modes; the engine
    /// remains ready for the next request.
    Error { message: String },
}
