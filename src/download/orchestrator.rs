//! Download-and-save flow.
//!
//! [`DownloadOrchestrator`] drives the [`BackendClient`], checks the
//! response, picks a filename, collects the body, and hands the payload to
//! a [`SaveHost`]. Each call is self-contained; nothing is shared between
//! submissions apart from an optional [`SubmissionIndicator`].

use reqwest::header::CONTENT_DISPOSITION;
use tracing::{debug, info, instrument, warn};

use super::client::{BackendClient, encode_uri_component};
use super::error::DownloadError;
use super::filename::{decode_header_latin1, suggested_filename};
use super::result::DownloadResult;
use super::state::SubmissionIndicator;
use crate::save::{Blob, SaveHost, SavedTrack, save_payload};
use crate::source::DownloadRequest;

/// Runs download submissions against one backend.
#[derive(Debug, Clone)]
pub struct DownloadOrchestrator {
    client: BackendClient,
}

impl DownloadOrchestrator {
    /// Creates an orchestrator over `client`.
    #[must_use]
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// The underlying request client.
    #[must_use]
    pub fn client(&self) -> &BackendClient {
        &self.client
    }

    /// Requests the track and collects it into memory.
    ///
    /// The body is only read for success statuses.
    ///
    /// # Errors
    ///
    /// - [`DownloadError::Transport`] if the backend cannot be reached
    /// - [`DownloadError::DownloadFailed`] for any non-success status
    /// - [`DownloadError::BodyRead`] if the body cannot be read to completion
    #[instrument(skip(self, request), fields(source = %request))]
    pub async fn fetch(&self, request: &DownloadRequest) -> Result<DownloadResult, DownloadError> {
        let encoded = encode_uri_component(request.source_url());
        let response = self.client.fetch(&encoded).await.map_err(|e| {
            let endpoint = self.client.download_endpoint(&encoded);
            warn!(%endpoint, error = %e, "backend request failed");
            DownloadError::transport(endpoint, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "backend rejected download");
            return Err(DownloadError::download_failed(status.as_u16()));
        }

        let disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .map(|value| decode_header_latin1(value.as_bytes()));
        let filename = suggested_filename(disposition.as_deref());
        debug!(%filename, "resolved suggested filename");

        let payload = response.bytes().await.map_err(|e| {
            warn!(error = %e, "failed to read response body");
            DownloadError::body_read(e.to_string())
        })?;

        Ok(DownloadResult::new(payload, filename))
    }

    /// Requests the track and saves it through `host`.
    ///
    /// The host is only touched after a successful fetch.
    ///
    /// # Errors
    ///
    /// Returns the [`fetch`](Self::fetch) errors, or [`DownloadError::Save`]
    /// when the host fails.
    #[instrument(skip(self, request, host), fields(source = %request))]
    pub async fn download(
        &self,
        request: &DownloadRequest,
        host: &dyn SaveHost,
    ) -> Result<SavedTrack, DownloadError> {
        let (payload, filename) = self.fetch(request).await?.into_parts();
        let saved = save_payload(host, Blob::new(payload), &filename)
            .await
            .map_err(DownloadError::save)?;
        info!(
            filename = %saved.filename,
            path = %saved.location.display(),
            bytes = saved.bytes,
            "download complete"
        );
        Ok(saved)
    }

    /// Runs [`download`](Self::download) and records the outcome on `indicator`.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`download`](Self::download).
    pub async fn submit(
        &self,
        request: &DownloadRequest,
        host: &dyn SaveHost,
        indicator: &SubmissionIndicator,
    ) -> Result<SavedTrack, DownloadError> {
        indicator.begin();
        let outcome = self.download(request, host).await;
        indicator.finish(&outcome);
        outcome
    }
}
