//! SQLite schema creation and versioning.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database schema is newer than supported: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
    #[error("Not a game database (no schema version set)")]
    Uninitialized,
}

/// Current schema version, stored in `PRAGMA user_version`.
pub const CURRENT_VERSION: i32 = 1;

/// Name of the index built once all scans have finished.
pub const NAME_INDEX: &str = "i_name";

/// Create the games table if it doesn't exist.
///
/// This is idempotent and safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    conn.pragma_update(None, "user_version", CURRENT_VERSION)?;
    Ok(())
}

/// Build the canonical-name index.
///
/// Kept separate from [`create_schema`] so that bulk loading doesn't pay for
/// index maintenance on every insert.
pub fn create_name_index(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(&format!(
        "CREATE INDEX IF NOT EXISTS {NAME_INDEX} ON games(name);"
    ))?;
    Ok(())
}

/// Open or create a game database at the given path.
pub fn open_database(path: &Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    let version = get_schema_version(&conn)?;
    if version == 0 {
        create_schema(&conn)?;
    } else if version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: version,
        });
    }

    Ok(conn)
}

/// Open an existing game database without writing to it.
///
/// Unlike [`open_database`] this never creates the schema or changes the
/// journal mode, so a file that was never built is rejected.
pub fn open_database_read_only(path: &Path) -> Result<Connection, SchemaError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags)?;

    let version = get_schema_version(&conn)?;
    if version == 0 {
        return Err(SchemaError::Uninitialized);
    } else if version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: version,
        });
    }

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Delete a database file along with its WAL sidecar files.
///
/// Returns `false` if there was nothing to delete.
pub fn remove_database(path: &Path) -> Result<bool, SchemaError> {
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_file(path)?;
    for suffix in ["-wal", "-shm"] {
        let mut sidecar = path.as_os_str().to_owned();
        sidecar.push(suffix);
        let sidecar = Path::new(&sidecar);
        if sidecar.exists() {
            std::fs::remove_file(sidecar)?;
        }
    }
    Ok(true)
}

/// Get the current schema version, or 0 for a fresh database.
fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS games (
    setname TEXT PRIMARY KEY,
    description TEXT NOT NULL,
    name TEXT NOT NULL,
    version TEXT,
    year INTEGER,
    path TEXT,
    is_default INTEGER DEFAULT 0
);
"#;
