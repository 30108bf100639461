use mister_arcade_db::open_memory;
use mister_arcade_db::schema::{CURRENT_VERSION, NAME_INDEX, SchemaError, create_schema};
use mister_arcade_db::{
    create_name_index, open_database, open_database_read_only, remove_database, store_stats,
};

#[test]
fn create_schema_in_memory() {
    let conn = open_memory().unwrap();
    let version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap();
    assert_eq!(version, CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    // Creating again should not error
    create_schema(&conn).unwrap();
}

#[test]
fn games_table_columns() {
    let conn = open_memory().unwrap();
    let mut stmt = conn.prepare("PRAGMA table_info(games)").unwrap();
    let columns: Vec<String> = stmt
        .query_map([], |row| row.get(1))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        columns,
        ["setname", "description", "name", "version", "year", "path", "is_default"]
    );
}

#[test]
fn name_index_created_on_demand() {
    let conn = open_memory().unwrap();
    let index_exists = |conn: &rusqlite::Connection| -> bool {
        conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='index' AND name=?1)",
            [NAME_INDEX],
            |row| row.get(0),
        )
        .unwrap()
    };
    assert!(!index_exists(&conn));
    create_name_index(&conn).unwrap();
    create_name_index(&conn).unwrap();
    assert!(index_exists(&conn));
}

#[test]
fn open_database_on_disk_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arcade.db");
    {
        let conn = open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO games (setname, description, name) VALUES ('sf2', 'Street Fighter II', 'street fighter ii')",
            [],
        )
        .unwrap();
    }
    let conn = open_database(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn newer_schema_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.pragma_update(None, "user_version", CURRENT_VERSION + 1)
            .unwrap();
    }
    assert!(matches!(
        open_database(&path),
        Err(SchemaError::VersionMismatch { .. })
    ));
}

#[test]
fn read_only_open_leaves_unbuilt_file_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db");
    std::fs::write(&path, b"").unwrap();

    assert!(matches!(
        open_database_read_only(&path),
        Err(SchemaError::Uninitialized)
    ));
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    assert!(!dir.path().join("notes.db-wal").exists());
}

#[test]
fn read_only_open_reads_but_never_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arcade.db");
    {
        let conn = open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO games (setname, description, name) VALUES ('sf2', 'SF2', 'sf2')",
            [],
        )
        .unwrap();
    }

    let conn = open_database_read_only(&path).unwrap();
    assert_eq!(store_stats(&conn).unwrap().games, 1);
    let write = conn.execute("DELETE FROM games", []);
    assert!(write.is_err());
}

#[test]
fn read_only_open_rejects_newer_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.pragma_update(None, "user_version", CURRENT_VERSION + 1)
            .unwrap();
    }
    assert!(matches!(
        open_database_read_only(&path),
        Err(SchemaError::VersionMismatch { .. })
    ));
}

#[test]
fn remove_database_deletes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arcade.db");
    assert!(!remove_database(&path).unwrap());

    drop(open_database(&path).unwrap());
    assert!(path.exists());
    assert!(remove_database(&path).unwrap());
    assert!(!path.exists());
    assert!(!dir.path().join("arcade.db-wal").exists());
}
