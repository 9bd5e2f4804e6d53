//! Error types for the host save mechanism.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a [`SaveHost`](super::SaveHost).
#[derive(Debug, Error)]
pub enum SaveError {
    /// File system error while staging or writing the payload.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The reference was never minted by this host or was already revoked.
    #[error("unknown object reference: {url}")]
    UnknownObjectUrl {
        /// The unknown reference.
        url: String,
    },
}

impl SaveError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an unknown-reference error.
    pub fn unknown_object_url(url: impl Into<String>) -> Self {
        Self::UnknownObjectUrl { url: url.into() }
    }
}
