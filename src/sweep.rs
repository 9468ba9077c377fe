use std::time::Duration;

use tokio::sync::watch;

use crate::state::SharedState;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);
const LIMITER_MAX_AGE: Duration = Duration::from_secs(60 * 60);

/// Periodically evict expired reset tokens and stale limiter windows.
/// Expiry is still enforced lazily at verification time; this loop only
/// bounds memory growth.
pub async fn run(state: SharedState, mut shutdown: watch::Receiver<bool>) {
    tracing::debug!("Expiry sweeper started");

    loop {
        if *shutdown.borrow() {
            break;
        }

        let purged = state.reset.sweep_expired();
        if purged > 0 {
            tracing::debug!("Swept {purged} expired reset tokens");
        }

        state.send_limiter.cleanup(LIMITER_MAX_AGE);
        state.verify_limiter.cleanup(LIMITER_MAX_AGE);

        tokio::select! {
            _ = tokio::time::sleep(SWEEP_INTERVAL) => {}
            _ = shutdown.changed() => {}
        }
    }

    tracing::debug!("Expiry sweeper stopped");
}
