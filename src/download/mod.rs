//! Download flow against the proxy backend.
//!
//! This module provides the request client and the orchestrator that turns
//! a validated track link into a saved file.
//!
//! # Features
//!
//! - `encodeURIComponent`-compatible link encoding
//! - Filename extraction from the `Content-Disposition` header
//! - Uniform failure for non-success statuses, without reading the body
//! - Guaranteed release of temporary object references
//! - Shared last-write-wins submission state
//!
//! # Example
//!
//! ```no_run
//! use soundgrab_core::{
//!     BackendClient, BackendOrigin, DownloadOrchestrator, DownloadRequest, FileSystemHost,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let origin = BackendOrigin::parse("http://localhost:8000")?;
//! let orchestrator = DownloadOrchestrator::new(BackendClient::new(origin)?);
//! let request = DownloadRequest::new("https://soundcloud.com/artist/track")?;
//! let host = FileSystemHost::new("./downloads");
//! let saved = orchestrator.download(&request, &host).await?;
//! println!("Saved: {}", saved.location.display());
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod error;
pub(crate) mod filename;
mod orchestrator;
mod result;
mod state;

pub use client::{BackendClient, encode_uri_component};
pub use constants::{DOWNLOAD_ROUTE, HEALTHCHECK_ROUTE};
pub use error::{BODY_READ_FALLBACK_MESSAGE, DOWNLOAD_FAILED_MESSAGE, DownloadError};
pub use filename::{
    DEFAULT_FILENAME, decode_header_latin1, parse_content_disposition, suggested_filename,
};
pub use orchestrator::DownloadOrchestrator;
pub use result::DownloadResult;
pub use state::{SubmissionIndicator, SubmissionState};

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, DownloadError>` explicitly in function signatures.
