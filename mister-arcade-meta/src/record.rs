/// One row of the `games` table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameRecord {
    /// MAME set name (e.g. `sf2`). Primary key across every source.
    pub setname: String,
    pub description: String,
    /// Canonical name shared by all variants of a game (see [`crate::normalize_name`]).
    pub name: String,
    /// Revision label such as `(World 910522)`, possibly empty.
    pub version: String,
    /// Release year, 0 when unknown.
    pub year: i64,
    /// On-device descriptor path; only set by the descriptor scan.
    pub path: Option<String>,
    pub is_default: bool,
}
