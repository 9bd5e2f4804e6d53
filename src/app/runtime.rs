//! One soundgrab run: validate input, resolve settings, then check the backend or download.

use anyhow::{Context, Result, bail};
use soundgrab_core::{
    BackendClient, DownloadOrchestrator, DownloadRequest, FileSystemHost, SubmissionIndicator,
};
use tracing::{debug, info, warn};

use crate::app::exit_handler::ProcessExit;
use crate::app::{config_manager, progress_manager};
use crate::app_config::FileConfig;
use crate::cli::Args;

pub(crate) async fn run(args: &Args, file_config: Option<&FileConfig>) -> Result<ProcessExit> {
    // Links are validated before anything else so a rejected link never reaches the backend.
    let request = args.url.as_deref().map(DownloadRequest::new).transpose()?;

    let settings = config_manager::resolve_settings(args, file_config)?;
    debug!(?settings, "run settings resolved");
    info!(backend = %settings.backend_origin, "soundgrab starting");

    let client = BackendClient::with_settings(settings.backend_origin.clone(), settings.transport)?;

    if args.check_backend {
        return check_backend(args, &client).await;
    }

    let Some(request) = request else {
        bail!("no track link given");
    };

    let orchestrator = DownloadOrchestrator::new(client);
    let host = FileSystemHost::new(&settings.output_dir);
    let indicator = SubmissionIndicator::new();

    let spinner = (!args.quiet && !args.json).then(|| {
        progress_manager::spawn_spinner(indicator.subscribe(), format!("Downloading {request}..."))
    });

    let outcome = orchestrator.submit(&request, &host, &indicator).await;

    if let Some(handle) = spinner
        && let Err(e) = handle.await
    {
        warn!(error = %e, "spinner task failed");
    }

    if args.json {
        println!("{}", serde_json::to_string(&indicator.current())?);
    }

    let saved = outcome?;
    if !args.json && !args.quiet {
        println!("Saved {} ({} bytes)", saved.location.display(), saved.bytes);
    }
    Ok(ProcessExit::Success)
}

async fn check_backend(args: &Args, client: &BackendClient) -> Result<ProcessExit> {
    let origin = client.origin().clone();
    let healthy = client
        .health_check()
        .await
        .with_context(|| format!("backend {origin} is unreachable"))?;

    if args.json {
        println!(
            "{}",
            serde_json::json!({ "backend": origin.as_str(), "healthy": healthy })
        );
    } else if healthy {
        if !args.quiet {
            println!("Backend {origin} is healthy");
        }
    } else {
        eprintln!("Backend {origin} responded but is not healthy");
    }

    Ok(if healthy {
        ProcessExit::Success
    } else {
        ProcessExit::Failure
    })
}
