//! Session Cleanup
//!
//! Periodically purges expired session records from the active backend.

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::domain::repository::SessionRepository;

pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Run one cleanup pass. Failures are logged and swallowed.
pub async fn purge_expired_sessions<S: SessionRepository>(sessions: &S) -> u64 {
    match sessions.cleanup_expired().await {
        Ok(deleted) => {
            if deleted > 0 {
                tracing::info!(sessions_deleted = deleted, "Expired sessions purged");
            }
            deleted
        }
        Err(e) => {
            tracing::warn!(error = %e, "Session cleanup failed, will retry");
            0
        }
    }
}

/// Purge expired sessions now and then every `every`.
pub fn spawn_session_cleanup<S>(sessions: S, every: Duration) -> JoinHandle<()>
where
    S: SessionRepository + Sync + 'static,
{
    tokio::spawn(async move {
        // First tick completes immediately
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            purge_expired_sessions(&sessions).await;
        }
    })
}
