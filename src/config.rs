//! Backend origin and transport configuration.
//!
//! The backend origin is mandatory: there is no built-in default, and
//! construction fails fast when it is missing or malformed.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Environment variable consulted for the backend origin.
pub const BACKEND_ORIGIN_ENV: &str = "BACKEND_ORIGIN";

/// Errors raised while resolving runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No backend origin was supplied by flag, environment, or config file.
    #[error(
        "backend origin is not configured\n  Suggestion: pass --backend-origin, set BACKEND_ORIGIN, or add `backend_origin` to the config file"
    )]
    MissingBackendOrigin,

    /// The supplied backend origin is not an http(s) base address.
    #[error("invalid backend origin '{origin}': {reason}")]
    InvalidBackendOrigin {
        /// The rejected value.
        origin: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The HTTP transport could not be constructed.
    #[error("failed to build HTTP transport: {source}")]
    Transport {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl ConfigError {
    fn invalid_origin(origin: &str, reason: impl Into<String>) -> Self {
        Self::InvalidBackendOrigin {
            origin: origin.to_string(),
            reason: reason.into(),
        }
    }
}

/// Validated base address (scheme + host + optional port/path) of the download backend.
///
/// Trailing slashes are stripped so that endpoint joins produce exactly one
/// separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendOrigin {
    base: String,
}

impl BackendOrigin {
    /// Parses and validates a backend origin.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBackendOrigin`] when the value is not an
    /// absolute http(s) URL with a host, or carries a query or fragment.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingBackendOrigin);
        }
        let parsed = Url::parse(trimmed).map_err(|e| ConfigError::invalid_origin(trimmed, e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::invalid_origin(
                trimmed,
                format!("scheme '{}' is not supported", parsed.scheme()),
            ));
        }
        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(ConfigError::invalid_origin(trimmed, "missing host"));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(ConfigError::invalid_origin(
                trimmed,
                "query strings and fragments are not allowed",
            ));
        }

        let base = parsed.as_str().trim_end_matches('/').to_string();
        Ok(Self { base })
    }

    /// Resolves the origin from the first present source, in priority order.
    ///
    /// Empty values are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingBackendOrigin`] when every source is empty,
    /// or the parse error of the first present source.
    pub fn resolve<'a>(
        candidates: impl IntoIterator<Item = Option<&'a str>>,
    ) -> Result<Self, ConfigError> {
        candidates
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
            .ok_or(ConfigError::MissingBackendOrigin)
            .and_then(Self::parse)
    }

    /// Returns the base address without a trailing slash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Joins an absolute path (starting with `/`) onto the origin.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

impl fmt::Display for BackendOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

impl FromStr for BackendOrigin {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Timeouts applied to the underlying HTTP transport.
///
/// `None` leaves the transport default in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportSettings {
    /// Connection establishment timeout.
    pub connect_timeout: Option<Duration>,
    /// Whole-request timeout, including reading the body.
    pub read_timeout: Option<Duration>,
}

impl TransportSettings {
    /// Builds settings from optional second counts.
    #[must_use]
    pub fn from_secs(connect_secs: Option<u64>, read_secs: Option<u64>) -> Self {
        Self {
            connect_timeout: connect_secs.map(Duration::from_secs),
            read_timeout: read_secs.map(Duration::from_secs),
        }
    }
}
