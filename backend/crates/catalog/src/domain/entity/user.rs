//! User Entity

use chrono::{DateTime, Utc};
use kernel::model::UserView;
use platform::password::HashedSecret;

/// Registered user. Holds the secret only as an Argon2id hash.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique, also the login identifier
    pub username: String,
    pub email: String,
    pub secret_hash: HashedSecret,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, email: String, secret_hash: HashedSecret) -> Self {
        Self {
            username,
            email,
            secret_hash,
            created_at: Utc::now(),
        }
    }

    /// Public view, without the secret
    pub fn view(&self) -> UserView {
        UserView {
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}
