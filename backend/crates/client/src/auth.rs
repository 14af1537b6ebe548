//! Authenticator
//!
//! Owns the client's [`AuthState`]. The state sits behind an async mutex
//! that stays locked for the whole login request, so concurrent callers
//! racing on an unauthenticated client share a single login.

use kernel::model::{LoginRequest, SuccessResponse};
use reqwest::Method;
use tokio::sync::Mutex;

use crate::config::Credentials;
use crate::error::{ClientError, ClientResult, server_message};
use crate::transport::Transport;

/// Whether this client has logged in. Only a successful login moves it
/// forward, and nothing moves it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticated,
}

/// Proof that the server accepted a login
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionAcknowledged;

pub struct Authenticator {
    credentials: Option<Credentials>,
    login_url: String,
    state: Mutex<AuthState>,
}

impl Authenticator {
    pub fn new(credentials: Option<Credentials>, login_url: String) -> Self {
        Self {
            credentials: credentials.filter(Credentials::is_complete),
            login_url,
            state: Mutex::new(AuthState::Unauthenticated),
        }
    }

    pub async fn state(&self) -> AuthState {
        *self.state.lock().await
    }

    /// Log in unconditionally
    pub async fn login<T>(&self, transport: &T) -> ClientResult<SessionAcknowledged>
    where
        T: Transport + Sync,
    {
        let mut state = self.state.lock().await;
        self.login_locked(transport, &mut state).await
    }

    /// Log in unless already authenticated. Without credentials this is a
    /// no-op and the caller proceeds anonymously.
    pub async fn login_if_needed<T>(&self, transport: &T) -> ClientResult<()>
    where
        T: Transport + Sync,
    {
        if self.credentials.is_none() {
            return Ok(());
        }

        let mut state = self.state.lock().await;
        if *state == AuthState::Authenticated {
            return Ok(());
        }

        self.login_locked(transport, &mut state).await.map(|_| ())
    }

    async fn login_locked<T>(
        &self,
        transport: &T,
        state: &mut AuthState,
    ) -> ClientResult<SessionAcknowledged>
    where
        T: Transport + Sync,
    {
        let Some(credentials) = &self.credentials else {
            return Err(ClientError::AuthFailed(
                "no credentials configured".to_string(),
            ));
        };

        let login = LoginRequest {
            identifier: credentials.identifier().to_string(),
            secret: credentials.secret().to_string(),
        };
        let body =
            serde_json::to_value(&login).map_err(|e| ClientError::AuthFailed(e.to_string()))?;

        let response = transport
            .request(Method::POST, &self.login_url, Some(body))
            .await
            .map_err(|e| ClientError::AuthFailed(e.to_string()))?;

        if response.status != 200 {
            tracing::warn!(
                identifier = credentials.identifier(),
                status = response.status,
                "Login rejected"
            );
            return Err(ClientError::AuthFailed(server_message(
                response.status,
                response.body.as_ref(),
            )));
        }

        let acknowledged = response
            .body
            .and_then(|body| serde_json::from_value::<SuccessResponse>(body).ok())
            .is_some_and(|ack| ack.success);

        if !acknowledged {
            return Err(ClientError::AuthFailed(
                "login was not acknowledged".to_string(),
            ));
        }

        *state = AuthState::Authenticated;
        tracing::debug!(identifier = credentials.identifier(), "Logged in");

        Ok(SessionAcknowledged)
    }
}
