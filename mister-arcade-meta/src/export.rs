//! Streaming parser for the metadata export.
//!
//! Two record shapes can appear in the export, never nested:
//!
//! ```text
//! <MameFile>                          <machine name="sf2" sourcefile="...">
//!   <FileName>sf2</FileName>            <description>Street Fighter II</description>
//!   <Name>Street Fighter II</Name>      <year>1991</year>
//!   <Version>(World 910522)</Version>   ...
//!   <Year>1991</Year>                 </machine>
//! </MameFile>
//! ```
//!
//! The left form is LaunchBox's `MAME.xml`, the right one is `mame -listxml`.
//! Only the listed fields are read; every other line is ignored.

use std::fs::File;
use std::path::Path;

use crate::encoding::DecodedLines;
use crate::error::MetaError;
use crate::extract::{extract_attribute, extract_int, extract_value};
use crate::normalize::normalize_name;
use crate::record::GameRecord;

const GAME_OPEN: &str = "<MameFile>";
const GAME_CLOSE: &str = "</MameFile>";
const MACHINE_OPEN: &str = "<machine ";
const MACHINE_CLOSE: &str = "</machine>";

/// Fields collected for the record currently being read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    pub setname: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub year: i64,
}

impl RecordDraft {
    /// Fill in whichever of description / name+version is missing and
    /// canonicalize the name.
    ///
    /// Returns `None` for records without a set name.
    pub fn finish(self) -> Option<GameRecord> {
        let RecordDraft {
            setname,
            mut name,
            mut version,
            mut description,
            year,
        } = self;

        if setname.is_empty() {
            log::warn!("Dropping export record without a set name: {description:?}");
            return None;
        }

        if description.is_empty() {
            description = format!("{name} {version}").trim().to_string();
        } else if name.is_empty() {
            match description.split_once('(') {
                Some((title, rest)) => {
                    name = title.trim().to_string();
                    version = format!("({rest}").trim().to_string();
                }
                None => name = description.trim().to_string(),
            }
        }

        Some(GameRecord {
            setname,
            description,
            name: normalize_name(&name),
            version,
            year,
            path: None,
            is_default: false,
        })
    }
}

/// Which record container the parser is inside.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ParseState {
    #[default]
    Idle,
    InGame(RecordDraft),
    InMachine(RecordDraft),
}

/// Line-at-a-time state machine over the export.
#[derive(Debug, Default)]
pub struct ExportParser {
    state: ParseState,
    abandoned: u64,
}

impl ExportParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ParseState {
        &self.state
    }

    /// Number of records discarded because another record opened before
    /// they were closed, or because the input ended inside them.
    pub fn abandoned(&self) -> u64 {
        self.abandoned
    }

    /// Consume one line. Returns a record when the line closes one.
    pub fn feed(&mut self, line: &str) -> Option<GameRecord> {
        let line = line.trim();

        if line == GAME_OPEN {
            self.open(ParseState::InGame(RecordDraft::default()));
            return None;
        }
        if line.starts_with(MACHINE_OPEN) {
            let draft = RecordDraft {
                setname: extract_attribute(line, "name"),
                ..RecordDraft::default()
            };
            self.open(ParseState::InMachine(draft));
            return None;
        }

        let closes = match &self.state {
            ParseState::Idle => false,
            ParseState::InGame(_) => line == GAME_CLOSE,
            ParseState::InMachine(_) => line == MACHINE_CLOSE,
        };
        if closes {
            return self.close();
        }

        match &mut self.state {
            ParseState::Idle => {}
            ParseState::InGame(draft) => {
                if line.starts_with("<FileName>") {
                    set_text(&mut draft.setname, line);
                } else if line.starts_with("<Name>") {
                    set_text(&mut draft.name, line);
                } else if line.starts_with("<Version>") {
                    set_text(&mut draft.version, line);
                } else if line.starts_with("<Year>") {
                    draft.year = extract_int(line);
                }
            }
            ParseState::InMachine(draft) => {
                if line.starts_with("<description>") {
                    set_text(&mut draft.description, line);
                } else if line.starts_with("<year>") {
                    draft.year = extract_int(line);
                }
            }
        }
        None
    }

    /// Signal end of input. An unterminated record is discarded.
    pub fn finish(&mut self) {
        if self.state != ParseState::Idle {
            log::debug!("Export ended inside an unterminated record");
            self.abandoned += 1;
            self.state = ParseState::Idle;
        }
    }

    fn open(&mut self, next: ParseState) {
        if let ParseState::InGame(draft) | ParseState::InMachine(draft) = &self.state {
            log::debug!("Record '{}' was never closed; discarding it", draft.setname);
            self.abandoned += 1;
        }
        self.state = next;
    }

    fn close(&mut self) -> Option<GameRecord> {
        match std::mem::take(&mut self.state) {
            ParseState::InGame(draft) | ParseState::InMachine(draft) => draft.finish(),
            ParseState::Idle => None,
        }
    }
}

fn set_text(field: &mut String, line: &str) {
    if let Some(value) = extract_value(line) {
        *field = value;
    }
}

/// Iterator adapter turning decoded lines into finished records.
pub struct ExportRecords<I> {
    lines: I,
    parser: ExportParser,
}

impl<I> ExportRecords<I> {
    pub fn parser(&self) -> &ExportParser {
        &self.parser
    }

    /// The underlying line source.
    pub fn lines(&self) -> &I {
        &self.lines
    }
}

impl<I> Iterator for ExportRecords<I>
where
    I: Iterator<Item = Result<String, MetaError>>,
{
    type Item = Result<GameRecord, MetaError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.lines.next() {
                Some(Ok(line)) => {
                    if let Some(record) = self.parser.feed(&line) {
                        return Some(Ok(record));
                    }
                }
                Some(Err(e)) => return Some(Err(e)),
                None => {
                    self.parser.finish();
                    return None;
                }
            }
        }
    }
}

/// Parse records from any source of lines.
pub fn parse_export<I>(lines: I) -> ExportRecords<I::IntoIter>
where
    I: IntoIterator<Item = Result<String, MetaError>>,
{
    ExportRecords {
        lines: lines.into_iter(),
        parser: ExportParser::new(),
    }
}

/// Open an export file (UTF-16 with BOM or UTF-8) for streaming.
///
/// Malformed bytes are replaced rather than aborting the whole export.
pub fn open_export(path: &Path) -> Result<ExportRecords<DecodedLines<File>>, MetaError> {
    let lines = DecodedLines::open(path, false)?;
    log::debug!("Reading {} as {}", path.display(), lines.encoding().name());
    Ok(parse_export(lines))
}

#[cfg(test)]
#[path = "tests/export_tests.rs"]
mod tests;
