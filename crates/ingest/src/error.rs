use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a source file into an invoice (or a report into a file).
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: malformed CSV: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}: missing required column `{column}`", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("{}: line {line}: quantity `{value}` is not a whole number", .path.display())]
    InvalidQuantity {
        path: PathBuf,
        line: u64,
        value: String,
    },

    #[error("{}: path has no file name to use as invoice identifier", .path.display())]
    MissingFileName { path: PathBuf },

    #[error("{}: could not encode report: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: load task failed: {message}", .path.display())]
    Task { path: PathBuf, message: String },
}

impl IngestError {
    /// The file this error is about.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. }
            | Self::Csv { path, .. }
            | Self::MissingColumn { path, .. }
            | Self::InvalidQuantity { path, .. }
            | Self::MissingFileName { path }
            | Self::Json { path, .. }
            | Self::Task { path, .. } => path,
        }
    }
}
