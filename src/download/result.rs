//! Result of a successful backend download.

use bytes::Bytes;

use super::filename::DEFAULT_FILENAME;

/// Retrieved payload and the filename to present it under.
///
/// `suggested_filename` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    payload: Bytes,
    suggested_filename: String,
}

impl DownloadResult {
    /// Builds a result, substituting [`DEFAULT_FILENAME`] for a blank filename.
    pub fn new(payload: Bytes, suggested_filename: impl Into<String>) -> Self {
        let suggested_filename = suggested_filename.into();
        let suggested_filename = if suggested_filename.trim().is_empty() {
            DEFAULT_FILENAME.to_string()
        } else {
            suggested_filename
        };
        Self {
            payload,
            suggested_filename,
        }
    }

    /// Downloaded bytes.
    #[must_use]
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Filename to present to the user.
    #[must_use]
    pub fn suggested_filename(&self) -> &str {
        &self.suggested_filename
    }

    /// Splits into payload and filename.
    #[must_use]
    pub fn into_parts(self) -> (Bytes, String) {
        (self.payload, self.suggested_filename)
    }
}
