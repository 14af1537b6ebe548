//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use kernel::id::{ProductId, SessionId};
use kernel::model::{NewProduct, Order, Product, ProductChange};

use crate::domain::entity::{order::OrderDraft, session::Session, user::User};
use crate::domain::query::{OrderQuery, ProductQuery};
use crate::error::CatalogResult;

/// Product repository trait
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    async fn get(&self, id: ProductId) -> CatalogResult<Option<Product>>;

    async fn list(&self, query: &ProductQuery) -> CatalogResult<Vec<Product>>;

    async fn create(&self, product: NewProduct) -> CatalogResult<Product>;

    /// Returns `None` if the product does not exist
    async fn edit(&self, id: ProductId, change: ProductChange) -> CatalogResult<Option<Product>>;

    /// Returns whether a product was actually removed
    async fn remove(&self, id: ProductId) -> CatalogResult<bool>;
}

/// Order repository trait
#[trait_variant::make(OrderRepository: Send)]
pub trait LocalOrderRepository {
    async fn create(&self, draft: OrderDraft) -> CatalogResult<Order>;

    /// Matching orders in insertion order
    async fn list(&self, query: &OrderQuery) -> CatalogResult<Vec<Order>>;
}

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Fails with `UsernameTaken` if the name exists
    async fn create(&self, user: &User) -> CatalogResult<()>;

    async fn find_by_username(&self, username: &str) -> CatalogResult<Option<User>>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    async fn create(&self, session: &Session) -> CatalogResult<()>;

    async fn find(&self, session_id: SessionId) -> CatalogResult<Option<Session>>;

    /// Delete expired sessions, returning how many went
    async fn cleanup_expired(&self) -> CatalogResult<u64>;
}

/// Everything the HTTP layer needs from one storage backend
pub trait CatalogRepository:
    ProductRepository
    + OrderRepository
    + UserRepository
    + SessionRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<R> CatalogRepository for R where
    R: ProductRepository
        + OrderRepository
        + UserRepository
        + SessionRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
