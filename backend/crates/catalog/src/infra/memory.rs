//! In-Memory Repository Implementation
//!
//! Default backend when no database is configured, and the backend used by
//! the test suites. Listing order is insertion order.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::{OrderId, ProductId, SessionId};
use kernel::model::{NewProduct, Order, Product, ProductChange};
use tokio::sync::RwLock;

use crate::domain::entity::{order::OrderDraft, session::Session, user::User};
use crate::domain::query::{OrderQuery, ProductQuery};
use crate::domain::repository::{
    OrderRepository, ProductRepository, SessionRepository, UserRepository,
};
use crate::error::{CatalogError, CatalogResult};

#[derive(Default)]
struct Inner {
    products: RwLock<Vec<Product>>,
    orders: RwLock<Vec<Order>>,
    users: RwLock<HashMap<String, User>>,
    sessions: RwLock<HashMap<SessionId, Session>>,
}

/// Memory-backed catalog repository. Clones share the same storage.
#[derive(Clone, Default)]
pub struct MemoryCatalogRepository {
    inner: Arc<Inner>,
}

impl MemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn session_count(&self) -> usize {
        self.inner.sessions.read().await.len()
    }
}

fn page<T: Clone>(
    items: &[T],
    offset: u32,
    limit: u32,
    mut keep: impl FnMut(&T) -> bool,
) -> Vec<T> {
    items
        .iter()
        .filter(|item| keep(item))
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect()
}

// ============================================================================
// Product Repository Implementation
// ============================================================================

impl ProductRepository for MemoryCatalogRepository {
    async fn get(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        let products = self.inner.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, query: &ProductQuery) -> CatalogResult<Vec<Product>> {
        let products = self.inner.products.read().await;
        Ok(page(&products, query.offset, query.limit, |p| {
            query.matches(p)
        }))
    }

    async fn create(&self, product: NewProduct) -> CatalogResult<Product> {
        let product = product.into_product(ProductId::new());
        self.inner.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn edit(&self, id: ProductId, change: ProductChange) -> CatalogResult<Option<Product>> {
        let mut products = self.inner.products.write().await;
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        change.apply_to(product);
        Ok(Some(product.clone()))
    }

    async fn remove(&self, id: ProductId) -> CatalogResult<bool> {
        let mut products = self.inner.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() != before)
    }
}

// ============================================================================
// Order Repository Implementation
// ============================================================================

impl OrderRepository for MemoryCatalogRepository {
    async fn create(&self, draft: OrderDraft) -> CatalogResult<Order> {
        let order = draft.into_order(OrderId::new());
        self.inner.orders.write().await.push(order.clone());
        Ok(order)
    }

    async fn list(&self, query: &OrderQuery) -> CatalogResult<Vec<Order>> {
        let orders = self.inner.orders.read().await;
        Ok(page(&orders, query.offset, query.limit, |o| query.matches(o)))
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for MemoryCatalogRepository {
    async fn create(&self, user: &User) -> CatalogResult<()> {
        let mut users = self.inner.users.write().await;
        if users.contains_key(&user.username) {
            return Err(CatalogError::UsernameTaken);
        }

        users.insert(user.username.clone(), user.clone());
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> CatalogResult<Option<User>> {
        Ok(self.inner.users.read().await.get(username).cloned())
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for MemoryCatalogRepository {
    async fn create(&self, session: &Session) -> CatalogResult<()> {
        self.inner
            .sessions
            .write()
            .await
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find(&self, session_id: SessionId) -> CatalogResult<Option<Session>> {
        let session = self.inner.sessions.read().await.get(&session_id).cloned();

        match session {
            Some(session) if session.is_expired() => {
                // Evict on sight; the periodic purge catches the rest
                self.inner.sessions.write().await.remove(&session_id);
                Ok(None)
            }
            session => Ok(session),
        }
    }

    async fn cleanup_expired(&self) -> CatalogResult<u64> {
        let now_ms = Utc::now().timestamp_millis();
        let mut sessions = self.inner.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.expires_at_ms > now_ms);

        let deleted = (before - sessions.len()) as u64;
        tracing::debug!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}
