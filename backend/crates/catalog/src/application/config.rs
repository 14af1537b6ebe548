//! Application Configuration
//!
//! Configuration for the catalog application layer.

use std::fmt;
use std::time::Duration;

use platform::cookie::CookieConfig;
/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Catalog application configuration
#[derive(Clone)]
pub struct CatalogConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// How long a login stays valid (12 hours)
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Login name that maps to the administrator
    pub admin_username: String,
    /// Administrator secret; admin login is disabled while unset
    pub admin_secret: Option<String>,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "catalog_session".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(12 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_secret: None,
            password_pepper: None,
        }
    }
}

impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("session_cookie_name", &self.session_cookie_name)
            .field("session_secret", &"[REDACTED]")
            .field("session_ttl", &self.session_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("admin_username", &self.admin_username)
            .field(
                "admin_secret",
                &self.admin_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "password_pepper",
                &self.password_pepper.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl CatalogConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: platform::crypto::random_key(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Enable admin login
    pub fn with_admin(mut self, username: impl Into<String>, secret: impl Into<String>) -> Self {
        self.admin_username = username.into();
        self.admin_secret = Some(secret.into());
        self
    }

    /// Cookie attributes for the session cookie
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            max_age_secs: Some(self.session_ttl.as_secs()),
            ..Default::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    pub fn is_admin_name(&self, username: &str) -> bool {
        username == self.admin_username
    }
}
