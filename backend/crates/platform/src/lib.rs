//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC-signed tokens, Base64)
//! - Secret hashing (Argon2id)
//! - Cookie management

pub mod cookie;
pub mod crypto;
pub mod password;
