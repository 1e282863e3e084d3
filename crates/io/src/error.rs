use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading rosters or writing the styled workbook.
#[derive(Debug, Error)]
pub enum IoError {
    /// File could not be read from disk.
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input exists but cannot be interpreted as a table.
    #[error("{} is not a readable table: {message}", .path.display())]
    Format { path: PathBuf, message: String },

    /// Requested worksheet does not exist.
    #[error("sheet '{sheet}' not found in {} (available: {})", .path.display(), .available.join(", "))]
    SheetNotFound {
        path: PathBuf,
        sheet: String,
        available: Vec<String>,
    },

    /// Theme configuration is unusable.
    #[error("invalid theme: {0}")]
    Theme(String),

    /// Workbook serialization failed. No document is produced.
    #[error("export failed: {0}")]
    Export(String),

    /// Serialized workbook could not be written.
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
