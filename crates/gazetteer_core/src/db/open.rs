//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections to gazetteer stores.
//! - Configure connection pragmas required by core behavior.
//! - Sniff whether an opened file is a gazetteer dataset at all.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - `is_valid_store` never raises; any probe failure reports `false`.
//! - No schema is created or migrated here; stores are opened as-is.

use super::DbResult;
use log::{error, info, warn};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens an existing SQLite store file.
///
/// # Side effects
/// - Performs connection pragma bootstrap.
/// - Emits `store_open` logging events with duration and status.
pub fn open_store(path: impl AsRef<Path>) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=store_open module=db status=start mode=file");

    let conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=store_open module=db status=error mode=file duration_ms={} error_code=store_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&conn) {
        Ok(()) => {
            info!(
                "event=store_open module=db status=ok mode=file duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=store_open module=db status=error mode=file duration_ms={} error_code=store_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Opens an in-memory SQLite store.
///
/// # Side effects
/// - Performs connection pragma bootstrap.
/// - Emits `store_open` logging events with duration and status.
pub fn open_store_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=store_open module=db status=start mode=memory");

    let conn = match Connection::open_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=store_open module=db status=error mode=memory duration_ms={} error_code=store_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&conn) {
        Ok(()) => {
            info!(
                "event=store_open module=db status=ok mode=memory duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=store_open module=db status=error mode=memory duration_ms={} error_code=store_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Returns whether the open connection points at a gazetteer dataset.
///
/// The check is a deliberately narrow sniff: the schema catalog must
/// contain a table named `continent`. Probe failures (for example a file
/// that is not a SQLite database at all) report `false` instead of
/// raising.
pub fn is_valid_store(conn: &Connection) -> bool {
    let probe = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'continent'
         );",
        [],
        |row| row.get::<_, i64>(0),
    );

    match probe {
        Ok(flag) => flag == 1,
        Err(err) => {
            warn!("event=store_sniff module=db status=invalid error={err}");
            false
        }
    }
}

fn bootstrap_connection(conn: &Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}
