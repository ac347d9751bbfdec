use std::time::Duration;

use tokio::sync::watch;

use crate::state::SharedState;

/// Periodically evict rate-limit entries whose window has elapsed, so idle clients are
/// released even when no new submissions arrive to trigger the lazy sweep.
pub fn spawn_sweeper(
    state: SharedState,
    mut shutdown: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    let period = state
        .submission_limiter
        .window()
        .max(Duration::from_secs(1));

    tokio::spawn(async move {
        tracing::debug!("Rate limit sweeper started");

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(period) => {
                    state.submission_limiter.cleanup();
                    tracing::trace!(
                        clients = state.submission_limiter.store().tracked_clients(),
                        "Rate limit store swept"
                    );
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        tracing::debug!("Rate limit sweeper stopped");
    })
}
