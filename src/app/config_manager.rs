//! Configuration lifecycle: merge CLI flags, environment, and file config into run settings.

use std::path::PathBuf;

use anyhow::Result;
use soundgrab_core::config::BACKEND_ORIGIN_ENV;
use soundgrab_core::{BackendOrigin, TransportSettings};

use crate::app_config::FileConfig;
use crate::cli::Args;

/// Settings for one run, after precedence has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunSettings {
    pub(crate) backend_origin: BackendOrigin,
    pub(crate) output_dir: PathBuf,
    pub(crate) transport: TransportSettings,
}

/// Resolves run settings with the process environment.
pub(crate) fn resolve_settings(args: &Args, file_config: Option<&FileConfig>) -> Result<RunSettings> {
    let env_origin = std::env::var(BACKEND_ORIGIN_ENV).ok();
    resolve_settings_with_env(args, env_origin.as_deref(), file_config)
}

/// Precedence: CLI flag > environment > config file > built-in default.
/// The backend origin has no built-in default.
pub(crate) fn resolve_settings_with_env(
    args: &Args,
    env_origin: Option<&str>,
    file_config: Option<&FileConfig>,
) -> Result<RunSettings> {
    let file_origin = file_config.and_then(|c| c.backend_origin.as_deref());
    let backend_origin =
        BackendOrigin::resolve([args.backend_origin.as_deref(), env_origin, file_origin])?;

    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| file_config.and_then(|c| c.output_dir.clone()))
        .unwrap_or_else(|| PathBuf::from("."));

    let connect_secs = args
        .connect_timeout
        .or_else(|| file_config.and_then(|c| c.connect_timeout_secs));
    let read_secs = args
        .read_timeout
        .or_else(|| file_config.and_then(|c| c.read_timeout_secs));

    Ok(RunSettings {
        backend_origin,
        output_dir,
        transport: TransportSettings::from_secs(connect_secs, read_secs),
    })
}
