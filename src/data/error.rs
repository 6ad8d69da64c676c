use std::path::PathBuf;

use thiserror::Error;

/// Why a dataset could not be produced from a file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("failed to read {}: {message}", path.display())]
    Read { path: PathBuf, message: String },

    #[error("column '{column}' appears more than once")]
    DuplicateColumn { column: String },

    #[error("row {row} has {found} cells but the header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}
