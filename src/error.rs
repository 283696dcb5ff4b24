//! Error handling

use std::path::PathBuf;

use thiserror::Error;

pub type DatasetResult<T> = Result<T, DatasetError>;

/// Coarse error category surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Remote fetch failed (network / HTTP level)
    Transfer,
    /// Directory or file creation, read or write failed
    Filesystem,
    /// Row layout, mirror key or table shape did not match
    Schema,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    // Transfer errors
    #[error("download of {url} failed: {message}")]
    Transfer { url: String, message: String },

    // Filesystem errors
    #[error("dataset file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Schema errors
    #[error("parse error in {} line {line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("unknown mirror '{0}'")]
    UnknownMirror(String),

    #[error("unknown split '{0}' (expected train, test or both)")]
    UnknownSplit(String),

    #[error("{0}")]
    Schema(String),
}

impl DatasetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DatasetError::Transfer { .. } => ErrorKind::Transfer,
            DatasetError::NotFound(_) | DatasetError::Io { .. } => ErrorKind::Filesystem,
            DatasetError::Parse { .. }
            | DatasetError::UnknownMirror(_)
            | DatasetError::UnknownSplit(_)
            | DatasetError::Schema(_) => ErrorKind::Schema,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DatasetError::Io { path: path.into(), source }
    }
}
