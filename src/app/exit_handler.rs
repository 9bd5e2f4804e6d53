//! Exit code logic for the soundgrab process.
//!
//! Single responsibility: map a run outcome to the process exit status.

use soundgrab_core::{ConfigError, SourceUrlError};

/// Process exit outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    /// Track saved, or backend healthy.
    Success,
    /// Download, save, or health check failed.
    Failure,
    /// Input or configuration rejected before any download was attempted.
    Usage,
}

impl ProcessExit {
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
            Self::Usage => 2,
        }
    }
}

/// Classifies a run error.
pub(crate) fn exit_outcome_for_error(error: &anyhow::Error) -> ProcessExit {
    if error.downcast_ref::<SourceUrlError>().is_some()
        || error.downcast_ref::<ConfigError>().is_some()
    {
        ProcessExit::Usage
    } else {
        ProcessExit::Failure
    }
}
