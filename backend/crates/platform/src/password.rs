//! Secret Hashing and Verification
//!
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Zeroization of clear text secrets
//! - Optional application-wide pepper
//!
//! No strength policy is enforced here; callers decide what to accept.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Secret hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Secret hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid secret hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Secret (Zeroized on drop)
// ============================================================================

/// Clear text secret, erased from memory on drop.
///
/// Not `Clone`, and `Debug` output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextSecret(String);

impl ClearTextSecret {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the clear text, e.g. for a constant-time comparison
    pub fn expose(&self) -> &str {
        &self.0
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Hash with Argon2id (m=19 MiB, t=2, p=1)
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedSecret, PasswordHashError> {
        let salt = SaltString::generate(OsRng);

        let hash = Argon2::default()
            .hash_password(&self.peppered(pepper), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedSecret {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextSecret")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Secret (Safe to store)
// ============================================================================

/// Argon2id hash in PHC string format
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextSecret;
///
/// let secret = ClearTextSecret::new("x");
/// let hashed = secret.hash(None).unwrap();
/// assert!(hashed.verify(&secret, None));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct HashedSecret {
    hash: String,
}

impl HashedSecret {
    /// Load from storage, validating the PHC format
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a clear text secret. The pepper must match the one used to hash.
    pub fn verify(&self, secret: &ClearTextSecret, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.hash) else {
            return false;
        };

        // Argon2 compares in constant time internally
        Argon2::default()
            .verify_password(&secret.peppered(pepper), &parsed_hash)
            .is_ok()
    }
}

impl fmt::Debug for HashedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedSecret")
            .field("hash", &"[HASH]")
            .finish()
    }
}
