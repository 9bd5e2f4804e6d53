//! Validation of user-supplied track links.
//!
//! A [`DownloadRequest`] can only be built from a syntactically valid
//! http(s) URL whose host is the target platform's domain or one of its
//! subdomains. The orchestrator never sees anything else.

mod error;
mod link;

pub use error::SourceUrlError;
pub use link::{DownloadRequest, TARGET_DOMAIN, is_target_host};
