//! Host save mechanism.
//!
//! Saving a downloaded payload follows a strict acquire/use/release
//! discipline:
//!
//! 1. wrap the payload as a [`Blob`]
//! 2. mint a temporary [`ObjectUrl`] for it ([`SaveHost::create_object_url`])
//! 3. trigger the native download action ([`SaveHost::trigger_download`])
//! 4. release the reference ([`SaveHost::revoke_object_url`])
//!
//! [`save_payload`] drives these steps and guarantees the release once a
//! reference has been minted. [`FileSystemHost`] is the implementation used
//! by the CLI.

mod error;
mod fs_host;

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, instrument};

pub use error::SaveError;
pub use fs_host::FileSystemHost;

/// Binary payload handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    data: Bytes,
}

impl Blob {
    /// Wraps a payload.
    #[must_use]
    pub fn new(data: Bytes) -> Self {
        Self { data }
    }

    /// Payload bytes.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Payload size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for an empty payload.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Temporary, process-local reference to a [`Blob`] held by a [`SaveHost`].
///
/// Not `Clone`: revoking consumes the reference.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// Wraps a host-minted reference string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The reference string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedTrack {
    /// Filename the download was presented under.
    pub filename: String,
    /// Where the host placed the file.
    pub location: PathBuf,
    /// Number of bytes saved.
    pub bytes: u64,
}

/// Host capability for materializing payloads as user-visible files.
#[async_trait]
pub trait SaveHost: Send + Sync {
    /// Mints a temporary reference to `blob`.
    async fn create_object_url(&self, blob: Blob) -> Result<ObjectUrl, SaveError>;

    /// Performs the native "download as file" action for `url` under `filename`.
    async fn trigger_download(&self, url: &ObjectUrl, filename: &str)
    -> Result<SavedTrack, SaveError>;

    /// Releases `url`. Must not fail; implementations log problems instead.
    async fn revoke_object_url(&self, url: ObjectUrl);
}

/// Saves `blob` under `filename` through `host`.
///
/// The reference is revoked exactly once whenever it was created, including
/// when the download action fails.
///
/// # Errors
///
/// Returns the host's [`SaveError`] from reference creation or the download action.
#[instrument(level = "debug", skip(host, blob), fields(bytes = blob.len()))]
pub async fn save_payload(
    host: &dyn SaveHost,
    blob: Blob,
    filename: &str,
) -> Result<SavedTrack, SaveError> {
    let url = host.create_object_url(blob).await?;
    debug!(%url, "object reference created");

    let outcome = host.trigger_download(&url, filename).await;

    debug!(%url, ok = outcome.is_ok(), "revoking object reference");
    host.revoke_object_url(url).await;
    outcome
}
