//! Per-submission display state.
//!
//! A submission moves `Idle -> Pending -> (Success | Error)`. Overlapping
//! submissions share one [`SubmissionIndicator`] and are not ordered:
//! whichever finishes last determines what is shown.

use serde::Serialize;
use tokio::sync::watch;

use super::error::DownloadError;
use crate::save::SavedTrack;

/// Display state of the most recent write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    /// Nothing submitted yet, or reset for the next submission.
    Idle,
    /// A submission is in flight.
    Pending,
    /// The last finished submission saved a track.
    Success {
        /// What was saved.
        track: SavedTrack,
    },
    /// The last finished submission failed.
    Error {
        /// Message shown next to the input.
        message: String,
    },
}

impl SubmissionState {
    /// True for `Success` and `Error`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::Error { .. })
    }
}

/// Shared last-write-wins holder for [`SubmissionState`].
#[derive(Debug)]
pub struct SubmissionIndicator {
    tx: watch::Sender<SubmissionState>,
}

impl Default for SubmissionIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionIndicator {
    /// Creates an indicator in the `Idle` state.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SubmissionState::Idle);
        Self { tx }
    }

    /// Marks a submission as in flight.
    pub fn begin(&self) {
        self.tx.send_replace(SubmissionState::Pending);
    }

    /// Records the outcome of a submission.
    pub fn finish(&self, outcome: &Result<SavedTrack, DownloadError>) {
        let state = match outcome {
            Ok(track) => SubmissionState::Success {
                track: track.clone(),
            },
            Err(e) => SubmissionState::Error {
                message: e.to_string(),
            },
        };
        self.tx.send_replace(state);
    }

    /// Returns to `Idle` for the next independent submission.
    pub fn reset(&self) {
        self.tx.send_replace(SubmissionState::Idle);
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn current(&self) -> SubmissionState {
        self.tx.borrow().clone()
    }

    /// Observes state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.tx.subscribe()
    }
}
