//! Descriptor (`.mra`) file parsing.
//!
//! Only the header of a descriptor matters here. Everything from the first
//! `<rom` element on is ROM assembly data and is never read:
//!
//! ```text
//! <misterromdescription>
//!     <name>Street Fighter II (World 910522)</name>
//!     <setname>sf2</setname>
//!     <year>1991</year>
//!     <bootleg>no</bootleg>
//!     <rom index="0" zip="sf2.zip" md5="None">
//! ```
//!
//! The display name comes from the file name rather than the `<name>`
//! element, since that is what the user sees in the device's menu.
//!
//! Descriptors without a BOM are read as Windows-1252, which accepts every
//! byte. UTF-8 files decode the same way wherever the header fields are
//! ASCII.

use std::io::Read;
use std::path::{Path, PathBuf};

use encoding_rs::WINDOWS_1252;

use crate::encoding::DecodedLines;
use crate::error::MetaError;
use crate::extract::{extract_int, extract_value};

/// How a descriptor competes for the default-variant slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    Standard,
    Bootleg,
    Homebrew,
}

impl DescriptorKind {
    /// Bootleg is checked first, so a file flagged both ways is a bootleg.
    pub fn classify(bootleg: bool, homebrew: bool) -> Self {
        if bootleg {
            Self::Bootleg
        } else if homebrew {
            Self::Homebrew
        } else {
            Self::Standard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Bootleg => "bootleg",
            Self::Homebrew => "homebrew",
        }
    }
}

/// Header fields read from a descriptor before its first `<rom`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorHeader {
    pub setname: String,
    pub bootleg: bool,
    pub homebrew: bool,
    pub year: i64,
}

/// A descriptor with a set name, ready for resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub setname: String,
    /// File name without its extension.
    pub description: String,
    pub name: String,
    pub version: String,
    pub year: i64,
    pub kind: DescriptorKind,
    /// Where the file was read from (before share-to-device rewriting).
    pub path: PathBuf,
}

/// Read header fields from descriptor lines, stopping at the first `<rom`.
pub fn read_header<I>(lines: I) -> Result<DescriptorHeader, MetaError>
where
    I: IntoIterator<Item = Result<String, MetaError>>,
{
    let mut header = DescriptorHeader::default();
    for line in lines {
        let line = line?;
        let line = line.trim();
        if line.starts_with("<setname>") {
            if let Some(value) = extract_value(line) {
                header.setname = value;
            }
        } else if line.starts_with("<homebrew>") {
            header.homebrew = is_yes(line);
        } else if line.starts_with("<bootleg>") {
            header.bootleg = is_yes(line);
        } else if line.starts_with("<year>") {
            header.year = extract_int(line);
        } else if line.starts_with("<rom") {
            break;
        }
    }
    Ok(header)
}

fn is_yes(line: &str) -> bool {
    extract_value(line).is_some_and(|v| v.eq_ignore_ascii_case("yes"))
}

/// Split a descriptor file name into `(description, name, version)`.
///
/// `Puckman (Japan) (bootleg).mra` gives description
/// `Puckman (Japan) (bootleg)`, name `Puckman` and version
/// `(Japan) (bootleg)`. A name that starts with `(` is kept whole.
pub fn split_file_name(file_name: &str) -> (String, String, String) {
    let description = match file_name.rsplit_once('.') {
        Some((stem, _ext)) => stem,
        None => file_name,
    };
    match description.find('(') {
        Some(pos) if pos > 0 => (
            description.to_string(),
            description[..pos].trim().to_string(),
            description[pos..].trim().to_string(),
        ),
        _ => (
            description.to_string(),
            description.to_string(),
            String::new(),
        ),
    }
}

/// Parse a descriptor from `reader`.
///
/// Returns `Ok(None)` when the header has no set name; such files are not
/// errors, they just contribute nothing.
pub fn parse_descriptor<R: Read>(
    reader: R,
    path: &Path,
    file_name: &str,
) -> Result<Option<Descriptor>, MetaError> {
    let header = read_header(DecodedLines::with_fallback(reader, WINDOWS_1252, true)?)?;
    if header.setname.is_empty() {
        return Ok(None);
    }

    let (description, name, version) = split_file_name(file_name);
    Ok(Some(Descriptor {
        setname: header.setname,
        description,
        name,
        version,
        year: header.year,
        kind: DescriptorKind::classify(header.bootleg, header.homebrew),
        path: path.to_path_buf(),
    }))
}

/// Open and parse a descriptor file. The file is closed before returning.
pub fn parse_descriptor_file(path: &Path) -> Result<Option<Descriptor>, MetaError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| MetaError::invalid_file_name(path.display().to_string()))?;
    let file = std::fs::File::open(path)?;
    parse_descriptor(file, path, file_name)
}

#[cfg(test)]
#[path = "tests/descriptor_tests.rs"]
mod tests;
