use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the record store. Each variant is meant to be shown
/// to the user as-is.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document '{0}' already exists. Try a different name.")]
    AlreadyExists(String),

    #[error("Invalid document name '{0}'")]
    InvalidName(String),

    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    #[error("Row {index} is out of range (document has {len} rows)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("I/O error on {}: {source}", .path.display())]
    IoFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::IoFailure {
            path: path.into(),
            source,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
