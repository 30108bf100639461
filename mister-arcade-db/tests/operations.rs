use mister_arcade_db::*;
use mister_arcade_meta::GameRecord;

fn export_record(setname: &str, description: &str, name: &str, year: i64) -> GameRecord {
    GameRecord {
        setname: setname.to_string(),
        description: description.to_string(),
        name: name.to_string(),
        year,
        ..GameRecord::default()
    }
}

#[test]
fn insert_batch_and_find() {
    let conn = open_memory().unwrap();
    let inserted = insert_games(
        &conn,
        &[
            export_record("sf2", "Street Fighter II", "street fighter ii", 1991),
            export_record("puckman", "Puck Man (Japan set 1)", "pac-man", 1980),
        ],
    )
    .unwrap();
    assert_eq!(inserted, 2);

    let sf2 = find_game(&conn, "sf2").unwrap().unwrap();
    assert_eq!(sf2.description, "Street Fighter II");
    assert_eq!(sf2.name, "street fighter ii");
    assert_eq!(sf2.version, "");
    assert_eq!(sf2.year, 1991);
    assert_eq!(sf2.path, None);
    assert!(!sf2.is_default);

    assert_eq!(find_game(&conn, "galaga").unwrap(), None);
}

#[test]
fn insert_batch_keeps_first_duplicate() {
    let conn = open_memory().unwrap();
    let inserted = insert_games(
        &conn,
        &[
            export_record("sf2", "Street Fighter II", "street fighter ii", 1991),
            export_record("sf2", "Something Else", "something else", 2000),
        ],
    )
    .unwrap();
    assert_eq!(inserted, 1);
    assert_eq!(
        find_game_name(&conn, "sf2").unwrap().as_deref(),
        Some("street fighter ii")
    );
}

#[test]
fn insert_empty_batch() {
    let conn = open_memory().unwrap();
    assert_eq!(insert_games(&conn, &[]).unwrap(), 0);
}

#[test]
fn insert_full_row() {
    let conn = open_memory().unwrap();
    let game = GameRecord {
        setname: "jtbubl".to_string(),
        description: "Bubble Bobble (homebrew)".to_string(),
        name: "bubble bobble".to_string(),
        version: "(homebrew)".to_string(),
        year: 1986,
        path: Some("/media/fat/_Arcade/Bubble Bobble (homebrew).mra".to_string()),
        is_default: true,
    };
    insert_game(&conn, &game).unwrap();
    assert_eq!(find_game(&conn, "jtbubl").unwrap(), Some(game));
}

#[test]
fn update_path_and_default() {
    let conn = open_memory().unwrap();
    insert_games(
        &conn,
        &[export_record("sf2", "Street Fighter II", "street fighter ii", 1991)],
    )
    .unwrap();

    update_game_path(&conn, "sf2", "/media/fat/_Arcade/sf2.mra", true).unwrap();
    let sf2 = find_game(&conn, "sf2").unwrap().unwrap();
    assert_eq!(sf2.path.as_deref(), Some("/media/fat/_Arcade/sf2.mra"));
    assert!(sf2.is_default);
    assert_eq!(sf2.name, "street fighter ii");
}

#[test]
fn update_missing_row_is_not_found() {
    let conn = open_memory().unwrap();
    let result = update_game_path(&conn, "nope", "/media/fat/x.mra", false);
    assert!(matches!(result, Err(OperationError::NotFound(s)) if s == "nope"));
}

#[test]
fn find_name_missing_row() {
    let conn = open_memory().unwrap();
    assert_eq!(find_game_name(&conn, "sf2").unwrap(), None);
}
