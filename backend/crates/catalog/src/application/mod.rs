//! Application Layer
//!
//! Use cases, access rules and configuration.

pub mod access;
pub mod config;
pub mod register_user;
pub mod resolve_identity;
pub mod session_cleanup;
pub mod sign_in;

// Re-exports
pub use config::CatalogConfig;
pub use register_user::RegisterUserUseCase;
pub use resolve_identity::ResolveIdentityUseCase;
pub use session_cleanup::{DEFAULT_CLEANUP_INTERVAL, spawn_session_cleanup};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
