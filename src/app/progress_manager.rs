//! Progress UI (spinner) driven by submission state.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use soundgrab_core::SubmissionState;
use tokio::sync::watch;

/// Spawns a spinner that runs while the observed submission is `Pending`.
///
/// The task ends once the submission reaches a terminal state or the
/// indicator is dropped.
pub(crate) fn spawn_spinner(
    mut states: watch::Receiver<SubmissionState>,
    message: String,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut spinner: Option<ProgressBar> = None;
        loop {
            let state = states.borrow_and_update().clone();
            match state {
                SubmissionState::Pending if spinner.is_none() => {
                    let bar = ProgressBar::new_spinner();
                    bar.set_style(
                        ProgressStyle::with_template("{spinner} {msg}")
                            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                    );
                    bar.enable_steady_tick(Duration::from_millis(100));
                    bar.set_message(message.clone());
                    spinner = Some(bar);
                }
                ref s if s.is_terminal() => break,
                _ => {}
            }
            if states.changed().await.is_err() {
                break;
            }
        }

        if let Some(bar) = spinner {
            bar.finish_and_clear();
        }
    })
}
