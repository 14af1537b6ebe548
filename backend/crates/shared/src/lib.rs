//! Shared Kernel - vocabulary shared by the catalog server and its client
//!
//! This crate contains the smallest core that both sides agree on:
//! - Common error types and result aliases
//! - Typed entity IDs
//! - The JSON wire model (products, orders, users, login)
//!
//! **Design Principle**: Only include things that are "hard to change"
//! because a change breaks the server/client contract.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod model;
