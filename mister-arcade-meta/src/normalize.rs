//! Canonical game names and on-device storage paths.

/// Literal rewrites applied after lower-casing, in order.
const NAME_ALIASES: [(&str, &str); 3] = [
    ("q'bert", "q*bert"),
    ("puck man", "pac-man"),
    ("puckman", "pac-man"),
];

/// Canonicalize a display name so that variants of one game group together.
///
/// Lower-cases the input and collapses a handful of known alternate titles.
/// Idempotent: a canonical name maps to itself.
pub fn normalize_name(raw: &str) -> String {
    let mut name = raw.to_lowercase();
    for (alias, canonical) in NAME_ALIASES {
        if name.contains(alias) {
            name = name.replace(alias, canonical);
        }
    }
    name
}

const SEPARATORS: [char; 2] = ['/', '\\'];

/// Rewrites paths as seen through a network share into paths on the device.
///
/// Descriptor files are read from wherever the device's storage is reachable
/// (e.g. `\\mister\sdcard` or `/mnt/mister`), but the table stores the path
/// the device itself uses (e.g. `/media/fat`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMapping {
    pub share_prefix: String,
    pub device_prefix: String,
}

impl PathMapping {
    pub fn new(share_prefix: impl Into<String>, device_prefix: impl Into<String>) -> Self {
        Self {
            share_prefix: share_prefix.into(),
            device_prefix: device_prefix.into(),
        }
    }

    /// Replace the share prefix with the device prefix and convert `\` to `/`.
    ///
    /// Paths outside the share only get their separators converted. The
    /// prefix only matches whole path components, so `/mnt/mister` leaves
    /// `/mnt/misterX/...` alone.
    pub fn normalize(&self, path: &str) -> String {
        let rewritten = match path.strip_prefix(self.share_prefix.as_str()) {
            Some(rest) if !self.share_prefix.is_empty() && self.at_boundary(rest) => {
                format!("{}{}", self.device_prefix, rest)
            }
            _ => path.to_string(),
        };
        rewritten.replace('\\', "/")
    }

    fn at_boundary(&self, rest: &str) -> bool {
        rest.is_empty() || rest.starts_with(SEPARATORS) || self.share_prefix.ends_with(SEPARATORS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_lowercases() {
        assert_eq!(normalize_name("Street Fighter II"), "street fighter ii");
    }

    #[test]
    fn test_normalize_name_aliases() {
        assert_eq!(normalize_name("Puckman"), "pac-man");
        assert_eq!(normalize_name("Puck Man"), "pac-man");
        assert_eq!(normalize_name("Pac-Man"), "pac-man");
        assert_eq!(normalize_name("Q'bert"), "q*bert");
        assert_eq!(normalize_name("Super Puckman"), "super pac-man");
    }

    #[test]
    fn test_normalize_name_idempotent() {
        for raw in ["Puckman", "Q'bert's Qubes", "Galaga '88", "", "ÉLAN"] {
            let once = normalize_name(raw);
            assert_eq!(normalize_name(&once), once);
        }
    }

    #[test]
    fn test_normalize_windows_share() {
        let mapping = PathMapping::new(r"\\mister\sdcard", "/media/fat");
        assert_eq!(
            mapping.normalize(r"\\mister\sdcard\_Arcade\Street Fighter II.mra"),
            "/media/fat/_Arcade/Street Fighter II.mra"
        );
    }

    #[test]
    fn test_normalize_unix_mount() {
        let mapping = PathMapping::new("/mnt/mister", "/media/fat");
        assert_eq!(
            mapping.normalize("/mnt/mister/_Arcade/_alternatives/sf2.mra"),
            "/media/fat/_Arcade/_alternatives/sf2.mra"
        );
    }

    #[test]
    fn test_normalize_outside_share() {
        let mapping = PathMapping::new("/mnt/mister", "/media/fat");
        assert_eq!(mapping.normalize(r"C:\games\sf2.mra"), "C:/games/sf2.mra");
    }

    #[test]
    fn test_normalize_sibling_of_share() {
        let mapping = PathMapping::new("/mnt/mister", "/media/fat");
        assert_eq!(
            mapping.normalize("/mnt/misterX/_Arcade/sf2.mra"),
            "/mnt/misterX/_Arcade/sf2.mra"
        );
        assert_eq!(mapping.normalize("/mnt/mister"), "/media/fat");

        let mapping = PathMapping::new(r"\\mister\sdcard", "/media/fat");
        assert_eq!(
            mapping.normalize(r"\\mister\sdcard2\_Arcade\sf2.mra"),
            "//mister/sdcard2/_Arcade/sf2.mra"
        );
    }

    #[test]
    fn test_normalize_prefix_with_trailing_separator() {
        let mapping = PathMapping::new("/mnt/mister/", "/media/fat/");
        assert_eq!(
            mapping.normalize("/mnt/mister/_Arcade/sf2.mra"),
            "/media/fat/_Arcade/sf2.mra"
        );
    }
}
