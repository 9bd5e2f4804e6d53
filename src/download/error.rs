//! Error types for the download flow.
//!
//! Display strings are the messages shown to the user; every failure is
//! surfaced as a message, never as a crash.

use thiserror::Error;

use crate::save::SaveError;

/// Message for any non-success backend status.
pub const DOWNLOAD_FAILED_MESSAGE: &str = "Failed to download track";

/// Message used when a body read error carries no text of its own.
pub const BODY_READ_FALLBACK_MESSAGE: &str = "Failed to read track data";

/// Errors that can occur while downloading and saving a track.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Network-level failure (DNS resolution, connection refused, timeout, ...).
    ///
    /// Displays the transport's own message verbatim.
    #[error("{source}")]
    Transport {
        /// Endpoint the request was sent to.
        endpoint: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Backend answered with a non-success status.
    #[error("Failed to download track")]
    DownloadFailed {
        /// The HTTP status code.
        status: u16,
    },

    /// The response body could not be read to completion.
    #[error("{message}")]
    BodyRead {
        /// Underlying message, or [`BODY_READ_FALLBACK_MESSAGE`].
        message: String,
    },

    /// The host save mechanism failed.
    #[error("failed to save track: {source}")]
    Save {
        /// The underlying save error.
        #[source]
        source: SaveError,
    },
}

impl DownloadError {
    /// Creates a transport error.
    pub fn transport(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Creates a download-failed error for a non-success status.
    #[must_use]
    pub fn download_failed(status: u16) -> Self {
        Self::DownloadFailed { status }
    }

    /// Creates a body read error, using the fallback message when `message` is blank.
    pub fn body_read(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            BODY_READ_FALLBACK_MESSAGE.to_string()
        } else {
            message
        };
        Self::BodyRead { message }
    }

    /// Creates a save error.
    #[must_use]
    pub fn save(source: SaveError) -> Self {
        Self::Save { source }
    }
}

// As in the rest of the crate, no `From<reqwest::Error>`: the transport
// variant needs the endpoint, and body read failures use the same source type.
