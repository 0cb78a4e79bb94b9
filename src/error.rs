use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while loading, cleaning or assembling figures.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("parsing JSON {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// One or more required columns are absent from the table header.
    #[error("{}: missing required column(s): {}", path.display(), missing.join(", "))]
    Schema { path: PathBuf, missing: Vec<String> },

    #[error("'{0}' is not a plausible calendar year")]
    InvalidYear(String),

    /// A data row carries more fields than the header names.
    #[error("{}: row {row} has {found} fields, header has {expected}", path.display())]
    TooManyFields {
        path: PathBuf,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CleanError>;
