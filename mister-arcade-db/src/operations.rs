//! Write operations and single-row lookups on the games table.

use mister_arcade_meta::GameRecord;
use rusqlite::{Connection, OptionalExtension, Row, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Game not found: '{0}'")]
    NotFound(String),
}

pub(crate) const GAME_COLUMNS: &str = "setname, description, name, version, year, path, is_default";

/// Insert a batch of export records in one transaction.
///
/// Only the metadata columns are written; `path` stays NULL and
/// `is_default` 0. A set name that already exists keeps its first row.
/// Returns the number of rows actually inserted.
pub fn insert_games(conn: &Connection, games: &[GameRecord]) -> Result<usize, OperationError> {
    let tx = conn.unchecked_transaction()?;
    let mut inserted = 0;
    {
        let mut stmt = tx.prepare_cached(
            "INSERT OR IGNORE INTO games (setname, description, name, version, year)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for game in games {
            inserted += stmt.execute(params![
                game.setname,
                game.description,
                game.name,
                game.version,
                game.year,
            ])?;
        }
    }
    tx.commit()?;
    Ok(inserted)
}

/// Insert a complete row, including path and default flag.
pub fn insert_game(conn: &Connection, game: &GameRecord) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO games (setname, description, name, version, year, path, is_default)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            game.setname,
            game.description,
            game.name,
            game.version,
            game.year,
            game.path,
            game.is_default,
        ],
    )?;
    Ok(())
}

/// Attach a path and set the default flag on an existing row.
pub fn update_game_path(
    conn: &Connection,
    setname: &str,
    path: &str,
    is_default: bool,
) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE games SET path = ?2, is_default = ?3 WHERE setname = ?1",
        params![setname, path, is_default],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound(setname.to_string()));
    }
    Ok(())
}

/// Stored canonical name for a set name, if the row exists.
pub fn find_game_name(conn: &Connection, setname: &str) -> Result<Option<String>, OperationError> {
    let mut stmt = conn.prepare_cached("SELECT name FROM games WHERE setname = ?1")?;
    let name = stmt
        .query_row(params![setname], |row| row.get::<_, String>(0))
        .optional()?;
    Ok(name)
}

/// Full row for a set name.
pub fn find_game(conn: &Connection, setname: &str) -> Result<Option<GameRecord>, OperationError> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {GAME_COLUMNS} FROM games WHERE setname = ?1"
    ))?;
    let game = stmt.query_row(params![setname], row_to_game).optional()?;
    Ok(game)
}

pub(crate) fn row_to_game(row: &Row<'_>) -> rusqlite::Result<GameRecord> {
    Ok(GameRecord {
        setname: row.get(0)?,
        description: row.get(1)?,
        name: row.get(2)?,
        version: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        year: row.get::<_, Option<i64>>(4)?.unwrap_or(0),
        path: row.get(5)?,
        is_default: row.get::<_, Option<bool>>(6)?.unwrap_or(false),
    })
}
