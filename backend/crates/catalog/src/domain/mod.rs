//! Domain Layer
//!
//! Contains entities, listing queries, and repository traits.

pub mod entity;
pub mod query;
pub mod repository;

// Re-exports
pub use entity::{identity::Identity, order::OrderDraft, session::Session, user::User};
pub use query::{OrderQuery, ProductQuery};
pub use repository::{
    CatalogRepository, OrderRepository, ProductRepository, SessionRepository, UserRepository,
};
