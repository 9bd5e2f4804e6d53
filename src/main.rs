//! CLI entry point for the soundgrab tool.

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

mod app;
mod app_config;
mod cli;

use app::exit_handler::{ProcessExit, exit_outcome_for_error};
use app_config::FileConfig;
use cli::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    let loaded = match app_config::load_default_file_config() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(ProcessExit::Usage.code());
        }
    };

    init_tracing(&args, loaded.config.as_ref());
    debug!(?args, config_path = ?loaded.path, "CLI arguments parsed");

    let exit = match app::runtime::run(&args, loaded.config.as_ref()).await {
        Ok(exit) => exit,
        Err(e) => {
            eprintln!("error: {e:#}");
            exit_outcome_for_error(&e)
        }
    };
    ExitCode::from(exit.code())
}

// Priority: RUST_LOG env var > quiet flag > verbose flag > config verbosity > default (info)
fn init_tracing(args: &Args, file_config: Option<&FileConfig>) {
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => file_config
                .and_then(|c| c.verbosity)
                .map_or("info", |v| v.filter_directive()),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
