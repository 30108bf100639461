/// Errors that can occur while reading the metadata export or descriptor files.
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed {encoding} text at byte {offset}")]
    MalformedText {
        encoding: &'static str,
        offset: u64,
    },

    #[error("Invalid descriptor file name: {0}")]
    InvalidFileName(String),
}

impl MetaError {
    pub fn invalid_file_name(name: impl Into<String>) -> Self {
        Self::InvalidFileName(name.into())
    }
}
