//! Errors surfaced by the content repository.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while listing or resolving content documents
#[derive(Debug, Error)]
pub enum ContentError {
    /// The content directory (or a file inside it) could not be read
    #[error("Content storage unavailable at {}: {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document's front matter block is missing, unterminated or invalid
    #[error("Malformed metadata in '{identifier}': {reason}")]
    MalformedMetadata { identifier: String, reason: String },

    /// No document matches the requested identifier
    #[error("Content not found: {0}")]
    NotFound(String),
}

impl ContentError {
    /// True for the expected "missing page" condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound(_))
    }

    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ContentError::StorageUnavailable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(identifier: impl Into<String>, reason: impl ToString) -> Self {
        ContentError::MalformedMetadata {
            identifier: identifier.into(),
            reason: reason.to_string(),
        }
    }
}
