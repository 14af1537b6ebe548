//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Generate a random 32-byte key
pub fn random_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    key
}

/// Encode bytes as URL-safe base64 without padding (cookie-safe)
pub fn to_base64(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode URL-safe base64 without padding
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(s)
}

/// Compute HMAC-SHA256
pub fn hmac_sha256(key: &[u8; 32], data: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Sign `payload` as `"<payload>.<base64url(hmac)>"`.
///
/// The payload must not contain `.`.
pub fn sign_token(key: &[u8; 32], payload: &str) -> String {
    let signature = hmac_sha256(key, payload.as_bytes());
    format!("{}.{}", payload, to_base64(&signature))
}

/// Verify a token produced by [`sign_token`] and return its payload.
///
/// Returns `None` for malformed tokens and bad signatures alike.
pub fn verify_token<'a>(key: &[u8; 32], token: &'a str) -> Option<&'a str> {
    let (payload, signature_b64) = token.split_once('.')?;
    if signature_b64.contains('.') {
        return None;
    }

    let signature = from_base64(signature_b64).ok()?;

    let mut mac = HmacSha256::new_from_slice(key).ok()?;
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature).ok()?;

    Some(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_key_differs() {
        assert_ne!(random_key(), random_key());
    }

    #[test]
    fn test_hmac_consistency() {
        let key = [0x0bu8; 32];
        let mac = hmac_sha256(&key, b"Hi There");
        assert_eq!(mac, hmac_sha256(&key, b"Hi There"));
        assert_ne!(mac, hmac_sha256(&[0x0cu8; 32], b"Hi There"));
    }

    #[test]
    fn test_sign_and_verify_token() {
        let key = [7u8; 32];
        let token = sign_token(&key, "session-123");

        assert_eq!(verify_token(&key, &token), Some("session-123"));
    }

    #[test]
    fn test_verify_token_rejects_tampering() {
        let key = [7u8; 32];
        let token = sign_token(&key, "session-123");

        let forged = token.replacen("session-123", "session-124", 1);
        assert_eq!(verify_token(&key, &forged), None);
        assert_eq!(verify_token(&[8u8; 32], &token), None);
        assert_eq!(verify_token(&key, "no-dot-here"), None);
        assert_eq!(verify_token(&key, "a.b.c"), None);
        assert_eq!(verify_token(&key, "payload.!!!"), None);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abcd", b"abcd"));
        assert!(!constant_time_eq(b"abcd", b"abce"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}
