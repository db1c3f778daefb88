use std::fs;
use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use crate::error::{StorageContext, StorageError};

/// Open (creating if needed) the SQLite file at `path` and make sure the
/// schema exists. The parent directory is created first so a fresh install
/// works without any manual setup.
pub fn open_store(path: &Path) -> Result<Connection, StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).storage("failed to create data directory")?;
        }
    }

    let conn = Connection::open(path).storage("failed to open SQLite database")?;
    ensure_schema(&conn)?;
    info!(path = %path.display(), "opened sales store");

    Ok(conn)
}

/// Throwaway store used by tests and previews.
pub fn open_in_memory_store() -> Result<Connection, StorageError> {
    let conn = Connection::open_in_memory().storage("failed to open in-memory database")?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Create the `sales` table if it is missing. Safe to call any number of
/// times.
///
/// `AUTOINCREMENT` keeps SQLite from handing out an id that belonged to a
/// deleted row, including after the whole table was cleared.
pub fn ensure_schema(conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS sales (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_name TEXT NOT NULL,
            beverage_name TEXT NOT NULL,
            beverage_price REAL NOT NULL,
            donation_amount REAL NOT NULL,
            beneficiary_name TEXT NOT NULL
        )",
        [],
    )
    .storage("failed to create sales table")?;

    Ok(())
}
