use mister_arcade_db::*;
use mister_arcade_meta::GameRecord;

fn row(
    setname: &str,
    name: &str,
    version: &str,
    path: Option<&str>,
    is_default: bool,
) -> GameRecord {
    GameRecord {
        setname: setname.to_string(),
        description: format!("{name} {version}").trim().to_string(),
        name: name.to_string(),
        version: version.to_string(),
        year: 1980,
        path: path.map(str::to_string),
        is_default,
    }
}

fn setup() -> rusqlite::Connection {
    let conn = open_memory().unwrap();
    for game in [
        row("puckman", "pac-man", "(Japan set 1)", Some("/media/fat/_Arcade/Puckman.mra"), true),
        row(
            "pacman",
            "pac-man",
            "(Midway)",
            Some("/media/fat/_Arcade/_alternatives/Pac-Man (Midway).mra"),
            false,
        ),
        row("pacmanf", "pac-man", "(Midway, with speedup hack)", None, false),
        row(
            "puckmanb",
            "pac-man",
            "(bootleg)",
            Some("/media/fat/_Arcade/_alternatives/Puckman (bootleg).mra"),
            false,
        ),
        row("galaga", "galaga", "(Namco rev. B)", Some("/media/fat/_Arcade/Galaga.mra"), true),
    ] {
        insert_game(&conn, &game).unwrap();
    }
    conn
}

fn setnames(variants: &[Variant]) -> Vec<&str> {
    variants.iter().map(|v| v.game.setname.as_str()).collect()
}

#[test]
fn variants_selected_first() {
    let conn = setup();
    let variants = find_variants(&conn, "pacman").unwrap();
    // Selected row, then the default, then by version; pathless rows excluded.
    assert_eq!(setnames(&variants), ["pacman", "puckman", "puckmanb"]);
    assert!(variants[0].selected);
    assert!(!variants[1].selected);
}

#[test]
fn variants_of_default() {
    let conn = setup();
    let variants = find_variants(&conn, "puckman").unwrap();
    assert_eq!(setnames(&variants), ["puckman", "pacman", "puckmanb"]);
}

#[test]
fn variants_for_pathless_row() {
    let conn = setup();
    let variants = find_variants(&conn, "pacmanf").unwrap();
    assert_eq!(setnames(&variants), ["puckman", "pacman", "puckmanb"]);
    assert!(variants.iter().all(|v| !v.selected));
}

#[test]
fn variants_unknown_setname() {
    let conn = setup();
    assert!(find_variants(&conn, "dkong").unwrap().is_empty());
}

#[test]
fn games_by_name_sorted() {
    let conn = setup();
    let games = games_by_name(&conn, "pac-man").unwrap();
    let names: Vec<&str> = games.iter().map(|g| g.setname.as_str()).collect();
    assert_eq!(names, ["pacman", "pacmanf", "puckman", "puckmanb"]);
}

#[test]
fn stats_counts() {
    let conn = setup();
    let stats = store_stats(&conn).unwrap();
    assert_eq!(
        stats,
        StoreStats {
            games: 5,
            with_path: 4,
            defaults: 2,
            names: 2,
        }
    );
}

#[test]
fn stats_empty_table() {
    let conn = open_memory().unwrap();
    assert_eq!(store_stats(&conn).unwrap(), StoreStats::default());
}
