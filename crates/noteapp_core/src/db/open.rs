//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Ensure the notes schema exists before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and a busy timeout set.
//! - Returned connections have the `notes` table present.

use super::{StorageError, StorageResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const SCHEMA_SQL: &str = include_str!("schema.sql");
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the notes database file and ensures the schema exists.
///
/// # Side effects
/// - Creates the database file when absent.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> StorageResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    let result = Connection::open(path)
        .map_err(StorageError::Connection)
        .and_then(bootstrap_connection);
    match result {
        Ok(conn) => {
            info!(
                "event=db_open module=db status=ok mode=file duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Opens an in-memory notes database with the schema applied.
///
/// Used by tests and by hosts that want a scratch store.
pub fn open_db_in_memory() -> StorageResult<Connection> {
    let conn = Connection::open_in_memory().map_err(StorageError::Connection)?;
    let conn = bootstrap_connection(conn)?;
    info!("event=db_open module=db status=ok mode=memory");
    Ok(conn)
}

fn bootstrap_connection(conn: Connection) -> StorageResult<Connection> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(StorageError::Connection)?;
    conn.busy_timeout(BUSY_TIMEOUT)
        .map_err(StorageError::Connection)?;
    conn.execute_batch(SCHEMA_SQL).map_err(StorageError::Schema)?;
    Ok(conn)
}
