//! Error types for book loading.

use std::path::PathBuf;

use dokapi_schema::{SchemaError, ValidationError};
use thiserror::Error;

/// Result type alias for book operations.
pub type BookResult<T> = Result<T, BookError>;

/// Errors that can occur while loading a book.
#[derive(Error, Debug)]
pub enum BookError {
    #[error("Input directory not found: {0}")]
    InputDirNotFound(PathBuf),

    #[error("Could not resolve input directory {path}: {source}")]
    InputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse JSON content of {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid book descriptor {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },

    #[error("Could not build book model from {path}: {source}")]
    Model {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
}

impl BookError {
    /// The schema violations, when the descriptor itself was rejected.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            BookError::Invalid { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Whether the failure comes from the input directory argument.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            BookError::InputDirNotFound(_) | BookError::InputDir { .. }
        )
    }
}
