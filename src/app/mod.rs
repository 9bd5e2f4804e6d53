//! Application layer for the soundgrab binary.

pub(crate) mod config_manager;
pub(crate) mod exit_handler;
pub(crate) mod progress_manager;
pub(crate) mod runtime;
