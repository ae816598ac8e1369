use std::path::Path;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SplitError>;

/// Everything that can stop a split (or bundle) from completing.
///
/// The `Display` text of each variant is the message handed back to whoever
/// asked for the split, so keep it readable on its own.
#[derive(Error, Debug)]
pub enum SplitError {
    /// The source could not be parsed as a PDF.
    #[error("Not a valid PDF document: {path} ({reason})")]
    InvalidDocument { path: String, reason: String },

    /// A mode-specific parameter is missing or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A split boundary falls outside `1..=total_pages`.
    #[error("Split page {boundary} is out of range (document has {total_pages} pages)")]
    OutOfRange { boundary: i64, total_pages: u32 },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// lopdf refused to serialize an output document.
    #[error("Failed to write PDF {path}: {reason}")]
    Write { path: String, reason: String },

    #[error("Failed to write archive {path}: {source}")]
    Archive {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },
}

impl SplitError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        SplitError::InvalidInput(message.into())
    }

    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        SplitError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
