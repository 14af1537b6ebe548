//! Sign In Use Case
//!
//! Checks credentials and opens a session.

use std::sync::Arc;

use platform::crypto::{constant_time_eq, sign_token};
use platform::password::ClearTextSecret;

use crate::application::config::CatalogConfig;
use crate::domain::entity::{identity::Identity, session::Session};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{CatalogError, CatalogResult};

/// Sign in input
pub struct SignInInput {
    /// Username (or the configured admin name)
    pub identifier: String,
    pub secret: ClearTextSecret,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// Signed token for the session cookie
    pub session_token: String,
    pub identity: Identity,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<CatalogConfig>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<CatalogConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> CatalogResult<SignInOutput> {
        let identity = if self.config.is_admin_name(&input.identifier) {
            self.authenticate_admin(&input)?
        } else {
            self.authenticate_user(&input).await?
        };

        let session = Session::new(&identity, self.config.session_ttl);
        self.session_repo.create(&session).await?;

        let session_token = sign_token(
            &self.config.session_secret,
            &session.session_id.to_string(),
        );

        tracing::info!(
            username = %identity.username,
            is_admin = identity.is_admin,
            "Signed in"
        );

        Ok(SignInOutput {
            session_token,
            identity,
        })
    }

    fn authenticate_admin(&self, input: &SignInInput) -> CatalogResult<Identity> {
        let Some(admin_secret) = self.config.admin_secret.as_deref() else {
            return Err(CatalogError::InvalidCredentials);
        };

        if !constant_time_eq(admin_secret.as_bytes(), input.secret.expose().as_bytes()) {
            return Err(CatalogError::InvalidCredentials);
        }

        Ok(Identity::admin(&input.identifier))
    }

    async fn authenticate_user(&self, input: &SignInInput) -> CatalogResult<Identity> {
        let user = self
            .user_repo
            .find_by_username(&input.identifier)
            .await?
            .ok_or(CatalogError::InvalidCredentials)?;

        if !user.secret_hash.verify(&input.secret, self.config.pepper()) {
            return Err(CatalogError::InvalidCredentials);
        }

        Ok(Identity::user(user.username))
    }
}
