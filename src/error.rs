//! Error types for splitwatch
//!
//! Persistence failures are mostly swallowed by callers (a missing or broken
//! store means "no prior data"), so only title validation and export failures
//! ever reach the user.

use std::path::PathBuf;
use thiserror::Error;

/// Failure reading or writing one of the JSON stores
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode data for {path}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Rejected title input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("title \"{0}\" already exists")]
    DuplicateTitle(String),
}

/// Failure adding a title to the registry
#[derive(Error, Debug)]
pub enum TitleError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("title could not be saved")]
    Persistence(#[from] PersistenceError),
}

impl TitleError {
    /// True when the title was rejected as a duplicate
    pub fn is_duplicate(&self) -> bool {
        matches!(self, TitleError::Invalid(ValidationError::DuplicateTitle(_)))
    }
}

/// Failure writing an export artifact
#[derive(Error, Debug)]
#[error("failed to export run to {path}: {source}")]
pub struct ExportError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
