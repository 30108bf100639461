//! Metadata readers for the arcade game database.
//!
//! Everything here is pure parsing: the line-oriented scalar extractor, name
//! and path normalization, the metadata export stream parser and the
//! descriptor file parser. Nothing in this crate touches the database.

pub mod descriptor;
pub mod encoding;
pub mod error;
pub mod export;
pub mod extract;
pub mod normalize;
pub mod record;

pub use descriptor::{
    Descriptor, DescriptorHeader, DescriptorKind, parse_descriptor, parse_descriptor_file,
    split_file_name,
};
pub use encoding::{DecodedLines, detect_encoding};
pub use error::MetaError;
pub use export::{ExportParser, ExportRecords, ParseState, open_export, parse_export};
pub use extract::{escape_entities, extract_attribute, extract_int, extract_value};
pub use normalize::{PathMapping, normalize_name};
pub use record::GameRecord;
