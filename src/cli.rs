//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Download a SoundCloud track through a download-proxy backend.
///
/// The backend origin must be supplied with --backend-origin, the
/// BACKEND_ORIGIN environment variable, or `backend_origin` in
/// ~/.config/soundgrab/config.toml.
#[derive(Parser, Debug)]
#[command(name = "soundgrab")]
#[command(author, version, about)]
pub struct Args {
    /// SoundCloud track link (https://soundcloud.com/...)
    #[arg(required_unless_present = "check_backend")]
    pub url: Option<String>,

    /// Base address of the download backend (e.g. http://localhost:8000)
    #[arg(short = 'b', long)]
    pub backend_origin: Option<String>,

    /// Directory to save the track into (default: current directory)
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// HTTP connect timeout in seconds (1-3600)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: Option<u64>,

    /// HTTP whole-request timeout in seconds (1-3600)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub read_timeout: Option<u64>,

    /// Only check that the backend is reachable, then exit
    #[arg(long)]
    pub check_backend: bool,

    /// Print the result as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
