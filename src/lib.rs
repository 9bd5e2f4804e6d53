//! Soundgrab Core Library
//!
//! This library provides the core functionality for the soundgrab tool,
//! which asks a download-proxy backend for a SoundCloud track and saves
//! the returned media file locally.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Backend origin and transport settings
//! - [`source`] - Validation of user-supplied track links
//! - [`download`] - Request client, download orchestrator and submission state
//! - [`save`] - Host save mechanism (object references and download actions)

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod download;
pub mod save;
pub mod source;
mod user_agent;

// Re-export commonly used types
pub use config::{BackendOrigin, ConfigError, TransportSettings};
pub use download::{
    BackendClient, DEFAULT_FILENAME, DownloadError, DownloadOrchestrator, DownloadResult,
    SubmissionIndicator, SubmissionState, encode_uri_component, parse_content_disposition,
};
pub use save::{Blob, FileSystemHost, ObjectUrl, SaveError, SaveHost, SavedTrack};
pub use source::{DownloadRequest, SourceUrlError};
