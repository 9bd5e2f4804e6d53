//! Track link parsing and host checks.

use std::fmt;

use tracing::debug;
use url::Url;

use super::error::SourceUrlError;

/// Registrable domain that submitted links must belong to.
pub const TARGET_DOMAIN: &str = "soundcloud.com";

/// Returns true when `host` is [`TARGET_DOMAIN`] or a subdomain of it.
///
/// Comparison is ASCII case-insensitive; `notsoundcloud.com` does not match.
#[must_use]
pub fn is_target_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    host == TARGET_DOMAIN
        || host
            .strip_suffix(TARGET_DOMAIN)
            .is_some_and(|prefix| prefix.ends_with('.') && prefix.len() > 1)
}

/// A validated link to a track on the target platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    source_url: String,
}

impl DownloadRequest {
    /// Validates `input` and wraps it as a request.
    ///
    /// The link is kept exactly as submitted (minus surrounding whitespace);
    /// it is not normalized, so the backend receives what the user typed.
    ///
    /// # Errors
    ///
    /// - [`SourceUrlError::Invalid`] if the input is empty, malformed, or not http(s)
    /// - [`SourceUrlError::WrongHost`] if the host is outside [`TARGET_DOMAIN`]
    ///
    /// # Examples
    ///
    /// ```
    /// use soundgrab_core::DownloadRequest;
    ///
    /// let request = DownloadRequest::new("https://soundcloud.com/artist/track").unwrap();
    /// assert_eq!(request.source_url(), "https://soundcloud.com/artist/track");
    /// assert!(DownloadRequest::new("https://example.com/x").is_err());
    /// ```
    pub fn new(input: &str) -> Result<Self, SourceUrlError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SourceUrlError::invalid(input));
        }

        let parsed = Url::parse(trimmed).map_err(|e| {
            debug!(input = %trimmed, error = %e, "source link failed to parse");
            SourceUrlError::invalid(trimmed)
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SourceUrlError::invalid(trimmed));
        }
        let Some(host) = parsed.host_str() else {
            return Err(SourceUrlError::invalid(trimmed));
        };
        if !is_target_host(host) {
            debug!(host, "source link rejected: host outside target domain");
            return Err(SourceUrlError::wrong_host(trimmed, host));
        }

        Ok(Self {
            source_url: trimmed.to_string(),
        })
    }

    /// The submitted link.
    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }
}

impl fmt::Display for DownloadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source_url)
    }
}
