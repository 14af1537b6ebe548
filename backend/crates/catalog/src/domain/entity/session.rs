//! Session Entity
//!
//! Server-side record behind a session cookie.

use std::time::Duration;

use chrono::Utc;
use kernel::id::SessionId;

use crate::domain::entity::identity::Identity;

/// Login session
///
/// The identity is captured at login time, so resolving a request never
/// needs a user lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: SessionId,
    pub username: String,
    pub is_admin: bool,
    pub created_at_ms: i64,
    pub expires_at_ms: i64,
}

impl Session {
    /// Start a session for `identity` that lives for `ttl`
    pub fn new(identity: &Identity, ttl: Duration) -> Self {
        let now_ms = Utc::now().timestamp_millis();
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);

        Self {
            session_id: SessionId::new(),
            username: identity.username.clone(),
            is_admin: identity.is_admin,
            created_at_ms: now_ms,
            expires_at_ms: now_ms.saturating_add(ttl_ms),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() >= self.expires_at_ms
    }

    pub fn identity(&self) -> Identity {
        Identity {
            username: self.username.clone(),
            is_admin: self.is_admin,
        }
    }
}
