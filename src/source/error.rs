//! Error types for source link validation.

use thiserror::Error;

/// Reasons a submitted link is rejected before any network call is made.
///
/// Display strings are the user-facing field messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceUrlError {
    /// Input is empty, malformed, or not an http(s) URL.
    #[error("Please enter a valid URL.")]
    Invalid {
        /// The rejected input.
        input: String,
    },

    /// Input is a valid URL on a host outside the target platform.
    #[error("URL must be a SoundCloud link.")]
    WrongHost {
        /// The rejected input.
        input: String,
        /// Host found in the URL.
        host: String,
    },
}

impl SourceUrlError {
    pub(crate) fn invalid(input: &str) -> Self {
        Self::Invalid {
            input: input.to_string(),
        }
    }

    pub(crate) fn wrong_host(input: &str, host: &str) -> Self {
        Self::WrongHost {
            input: input.to_string(),
            host: host.to_string(),
        }
    }
}
