use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    /// Source missing, unreadable or malformed.
    #[error("cannot load {}: {reason}", .path.display())]
    DataLoad { path: PathBuf, reason: String },

    /// Nothing usable to fit on (empty filter result, single-class target, degenerate solve).
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Output could not be encoded or written.
    #[error("cannot write {}: {reason}", .path.display())]
    Serialization { path: PathBuf, reason: String },
}

impl DataError {
    pub fn load(path: &Path, reason: impl ToString) -> Self {
        DataError::DataLoad {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn write(path: &Path, reason: impl ToString) -> Self {
        DataError::Serialization {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
