//! Client Configuration

use std::fmt;
use std::time::Duration;

use zeroize::Zeroizing;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:1337";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Login credentials, fixed for the lifetime of a client
#[derive(Clone)]
pub struct Credentials {
    identifier: String,
    secret: Zeroizing<String>,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: Zeroizing::new(secret.into()),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }

    /// Both identifier and secret are non-empty
    pub fn is_complete(&self) -> bool {
        !self.identifier.is_empty() && !self.secret.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Configuration for [`CatalogClient`](crate::CatalogClient)
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the catalog server
    pub endpoint: String,

    /// Without credentials the client never logs in. Credentials with an
    /// empty identifier or secret count as absent.
    pub credentials: Option<Credentials>,

    /// Per-request timeout (default: 30s)
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            credentials: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn with_credentials(
        mut self,
        identifier: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        self.credentials =
            Some(Credentials::new(identifier, secret)).filter(Credentials::is_complete);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, "http://localhost:1337");
        assert!(config.credentials.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_empty_credentials_are_dropped() {
        assert!(ClientConfig::default().with_credentials("", "").credentials.is_none());
        assert!(ClientConfig::default().with_credentials("alice", "").credentials.is_none());
        assert!(ClientConfig::default().with_credentials("alice", "x").credentials.is_some());
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = ClientConfig::default().with_credentials("alice", "hunter2");
        let debug = format!("{:?}", config);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }
}
