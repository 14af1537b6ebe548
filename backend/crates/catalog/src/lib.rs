//! Catalog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, listing queries, repository traits
//! - `application/` - Use cases, access rules, configuration
//! - `infra/` - In-memory and PostgreSQL repositories
//! - `presentation/` - HTTP handlers, DTOs, middleware, router
//!
//! ## Endpoints
//! - `POST /login` opens a cookie session
//! - `/products` readable by anyone, writable by the admin only
//! - `/orders` for logged-in callers, scoped to their own orders
//! - `POST /users` open registration
//!
//! ## Security Model
//! - Secrets hashed with Argon2id
//! - Session cookies carry an HMAC-signed session id
//! - Privilege checks run before any repository call

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use infra::{memory::MemoryCatalogRepository, postgres::PgCatalogRepository};
pub use presentation::router::{catalog_router, catalog_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::presentation::dto::*;
    pub use kernel::model::*;
}

pub mod store {
    pub use crate::infra::memory::MemoryCatalogRepository as MemoryStore;
    pub use crate::infra::postgres::PgCatalogRepository as CatalogStore;
}

#[cfg(test)]
mod tests;
