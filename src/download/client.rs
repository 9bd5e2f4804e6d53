//! HTTP client for the download backend.
//!
//! [`BackendClient`] builds `{origin}/download/{encoded}` and returns the raw
//! response. It does not interpret status codes, does not retry, and leaves
//! transport errors unclassified; the orchestrator owns those decisions.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Client;
use tracing::{debug, instrument};

use super::constants::{DOWNLOAD_ROUTE, HEALTHCHECK_ROUTE};
use crate::config::{BackendOrigin, ConfigError, TransportSettings};
use crate::user_agent;

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes `value` for use as a single path segment.
///
/// Matches `encodeURIComponent`: everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
/// is escaped, with non-ASCII characters encoded as UTF-8.
///
/// # Examples
///
/// ```
/// use soundgrab_core::encode_uri_component;
///
/// assert_eq!(
///     encode_uri_component("https://soundcloud.com/artist/track"),
///     "https%3A%2F%2Fsoundcloud.com%2Fartist%2Ftrack"
/// );
/// ```
#[must_use]
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// HTTP client bound to one backend origin.
///
/// Created once and reused, taking advantage of connection pooling.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    origin: BackendOrigin,
}

impl BackendClient {
    /// Creates a client with the transport's default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Transport`] if the HTTP client cannot be built.
    pub fn new(origin: BackendOrigin) -> Result<Self, ConfigError> {
        Self::with_settings(origin, TransportSettings::default())
    }

    /// Creates a client with explicit transport settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Transport`] if the HTTP client cannot be built.
    #[instrument(level = "debug", skip(origin), fields(origin = %origin))]
    pub fn with_settings(
        origin: BackendOrigin,
        settings: TransportSettings,
    ) -> Result<Self, ConfigError> {
        let mut builder = Client::builder()
            .gzip(true)
            .user_agent(user_agent::default_user_agent());
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.read_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|source| ConfigError::Transport { source })?;
        Ok(Self { client, origin })
    }

    /// The configured backend origin.
    #[must_use]
    pub fn origin(&self) -> &BackendOrigin {
        &self.origin
    }

    /// Builds the download endpoint for an already-encoded link.
    #[must_use]
    pub fn download_endpoint(&self, encoded_url: &str) -> String {
        self.origin.join(&format!("{DOWNLOAD_ROUTE}{encoded_url}"))
    }

    /// Sends `GET {origin}/download/{encoded_url}` and returns the raw response.
    ///
    /// `encoded_url` must already be percent-encoded (see [`encode_uri_component`]).
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged when the request cannot be completed.
    #[instrument(skip(self))]
    pub async fn fetch(&self, encoded_url: &str) -> Result<reqwest::Response, reqwest::Error> {
        let endpoint = self.download_endpoint(encoded_url);
        debug!(%endpoint, "sending download request");
        let response = self.client.get(&endpoint).send().await?;
        debug!(status = response.status().as_u16(), "backend responded");
        Ok(response)
    }

    /// Probes `GET {origin}/healthcheck`; true when the backend answers with success.
    ///
    /// # Errors
    ///
    /// Returns the transport error when the backend cannot be reached.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<bool, reqwest::Error> {
        let endpoint = self.origin.join(HEALTHCHECK_ROUTE);
        let response = self.client.get(&endpoint).send().await?;
        let healthy = response.status().is_success();
        debug!(%endpoint, status = response.status().as_u16(), healthy, "health check");
        Ok(healthy)
    }
}
