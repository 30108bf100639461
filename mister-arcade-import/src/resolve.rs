//! Merging descriptors into the games table.

use mister_arcade_db::{OperationError, find_game_name, insert_game, update_game_path};
use mister_arcade_meta::{Descriptor, GameRecord, normalize_name};
use rusqlite::Connection;

use crate::context::RunContext;

/// What [`update_game`] did with a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An export row received the descriptor's path.
    Updated { path: String, is_default: bool },
    /// No export row existed, so the descriptor became a new row.
    Inserted { path: String, is_default: bool },
    /// The set name already has a path from an earlier descriptor.
    Skipped { existing: String },
}

impl Resolution {
    pub fn is_default(&self) -> bool {
        matches!(
            self,
            Self::Updated {
                is_default: true,
                ..
            } | Self::Inserted {
                is_default: true,
                ..
            }
        )
    }
}

/// Attach a descriptor's path to its row, or insert the row.
///
/// The first descriptor seen for a set name wins; later ones are skipped.
/// The first row to reach a canonical name becomes its default variant.
pub fn update_game(
    conn: &Connection,
    ctx: &mut RunContext,
    descriptor: &Descriptor,
) -> Result<Resolution, OperationError> {
    ctx.stats.descriptors_processed += 1;

    if let Some(existing) = ctx.resolved.get(&descriptor.setname) {
        ctx.stats.duplicates_skipped += 1;
        return Ok(Resolution::Skipped {
            existing: existing.clone(),
        });
    }

    let path = ctx.mapping.normalize(&descriptor.path.to_string_lossy());

    let (name, resolution) = match find_game_name(conn, &descriptor.setname)? {
        Some(stored) => {
            let is_default = !ctx.claimed_names.contains(&stored);
            update_game_path(conn, &descriptor.setname, &path, is_default)?;
            (stored, Resolution::Updated { path, is_default })
        }
        None => {
            let name = normalize_name(&descriptor.name);
            let is_default = !ctx.claimed_names.contains(&name);
            insert_game(
                conn,
                &GameRecord {
                    setname: descriptor.setname.clone(),
                    description: descriptor.description.clone(),
                    name: name.clone(),
                    version: descriptor.version.clone(),
                    year: descriptor.year,
                    path: Some(path.clone()),
                    is_default,
                },
            )?;
            (name, Resolution::Inserted { path, is_default })
        }
    };

    if resolution.is_default() {
        ctx.claimed_names.insert(name);
    }
    ctx.resolved.insert(descriptor.setname.clone(), descriptor.description.clone());
    ctx.stats.games_updated += 1;
    Ok(resolution)
}
