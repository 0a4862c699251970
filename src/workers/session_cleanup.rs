use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::features::review::ReviewService;

/// Periodically drops review sessions idle for longer than `ttl`. Review
/// history is untouched; only the in-memory cursor goes away.
pub fn spawn_session_cleanup(
    service: Arc<ReviewService>,
    ttl: Duration,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // the first tick fires immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let evicted = service.evict_idle_sessions(ttl);
            if evicted > 0 {
                log::warn!("Evicted {} idle review sessions", evicted);
            } else {
                log::debug!("Session cleanup found nothing to evict");
            }
        }
    })
}
