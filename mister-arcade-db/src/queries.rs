//! Read queries for launchers and reporting.

use mister_arcade_meta::GameRecord;
use rusqlite::{Connection, params};

use crate::operations::{GAME_COLUMNS, OperationError, find_game, row_to_game};

/// A playable variant returned by [`find_variants`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub game: GameRecord,
    /// True for the row whose set name was asked for.
    pub selected: bool,
}

/// All playable variants of the game identified by `setname`.
///
/// The requested row comes first when it has a path, then every other row
/// with the same canonical name and a path. Ordering: the selected row, then
/// the default variant, then by version label.
pub fn find_variants(conn: &Connection, setname: &str) -> Result<Vec<Variant>, OperationError> {
    let Some(requested) = find_game(conn, setname)? else {
        return Ok(Vec::new());
    };

    let mut variants = Vec::new();
    if !requested.name.is_empty() {
        for game in games_by_name(conn, &requested.name)? {
            if game.path.is_some() && game.setname != requested.setname {
                variants.push(Variant {
                    game,
                    selected: false,
                });
            }
        }
    }
    if requested.path.is_some() {
        variants.push(Variant {
            game: requested,
            selected: true,
        });
    }

    variants.sort_by(|a, b| {
        b.selected
            .cmp(&a.selected)
            .then(b.game.is_default.cmp(&a.game.is_default))
            .then_with(|| a.game.version.cmp(&b.game.version))
    });
    Ok(variants)
}

/// Every row sharing a canonical name, in set name order.
pub fn games_by_name(conn: &Connection, name: &str) -> Result<Vec<GameRecord>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {GAME_COLUMNS} FROM games WHERE name = ?1 ORDER BY setname"
    ))?;
    let rows = stmt.query_map(params![name], row_to_game)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Summary counts over the games table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StoreStats {
    pub games: i64,
    pub with_path: i64,
    pub defaults: i64,
    pub names: i64,
}

pub fn store_stats(conn: &Connection) -> Result<StoreStats, OperationError> {
    let stats = conn.query_row(
        "SELECT COUNT(*),
                COUNT(path),
                COALESCE(SUM(is_default), 0),
                COUNT(DISTINCT name)
         FROM games",
        [],
        |row| {
            Ok(StoreStats {
                games: row.get(0)?,
                with_path: row.get(1)?,
                defaults: row.get(2)?,
                names: row.get(3)?,
            })
        },
    )?;
    Ok(stats)
}
