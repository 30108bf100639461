//! SQLite persistence layer for the arcade game table.
//!
//! Provides schema creation, the insert/update operations used while
//! building, and read queries used by lookups (via rusqlite with bundled
//! feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    OperationError, find_game, find_game_name, insert_game, insert_games, update_game_path,
};
pub use queries::{StoreStats, Variant, find_variants, games_by_name, store_stats};
pub use schema::{
    SchemaError, create_name_index, create_schema, open_database, open_database_read_only,
    open_memory, remove_database,
};

pub use rusqlite::Connection;
