//! Resolve Identity Use Case
//!
//! Maps a session token to the caller's identity.

use std::sync::Arc;

use kernel::id::SessionId;
use platform::crypto::verify_token;

use crate::application::config::CatalogConfig;
use crate::domain::entity::identity::Identity;
use crate::domain::repository::SessionRepository;
use crate::error::CatalogResult;

/// Resolve identity use case
pub struct ResolveIdentityUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<CatalogConfig>,
}

impl<S> ResolveIdentityUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<CatalogConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// `Ok(None)` for anything that is not a live session: bad signature,
    /// unknown id, expired. Only storage failures are errors.
    pub async fn execute(&self, session_token: &str) -> CatalogResult<Option<Identity>> {
        let Some(session_id) = self.parse_session_token(session_token) else {
            tracing::debug!("Rejected session token");
            return Ok(None);
        };

        let Some(session) = self.session_repo.find(session_id).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            tracing::debug!(username = %session.username, "Session expired");
            return Ok(None);
        }

        Ok(Some(session.identity()))
    }

    fn parse_session_token(&self, session_token: &str) -> Option<SessionId> {
        verify_token(&self.config.session_secret, session_token)?
            .parse()
            .ok()
    }
}
