//! Caller Identity
//!
//! Resolved per request from the session cookie; never stored on its own.

use derive_more::Display;

/// Who is calling, and whether they may administer the catalog
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{username}")]
pub struct Identity {
    pub username: String,
    pub is_admin: bool,
}

impl Identity {
    pub fn user(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            is_admin: false,
        }
    }

    pub fn admin(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            is_admin: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_display() {
        assert_eq!(Identity::user("alice").to_string(), "alice");
        assert_eq!(Identity::admin("root").to_string(), "root");
    }
}
