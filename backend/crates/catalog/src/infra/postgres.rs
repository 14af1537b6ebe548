//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::error::app_error::ResultExt;
use kernel::error::kind::ErrorKind;
use kernel::id::{OrderId, ProductId, SessionId};
use kernel::model::{NewProduct, Order, OrderStatus, Product, ProductChange};
use platform::password::HashedSecret;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{order::OrderDraft, session::Session, user::User};
use crate::domain::query::{OrderQuery, ProductQuery};
use crate::domain::repository::{
    OrderRepository, ProductRepository, SessionRepository, UserRepository,
};
use crate::error::{CatalogError, CatalogResult};

/// PostgreSQL-backed catalog repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Product Repository Implementation
// ============================================================================

impl ProductRepository for PgCatalogRepository {
    async fn get(&self, id: ProductId) -> CatalogResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT product_id, description, img_url, link, tags
            FROM products
            WHERE product_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn list(&self, query: &ProductQuery) -> CatalogResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT product_id, description, img_url, link, tags
            FROM products
            WHERE ($1::TEXT IS NULL OR $1 = ANY(tags))
            ORDER BY seq
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(query.tag.as_deref())
        .bind(i64::from(query.offset))
        .bind(i64::from(query.limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }

    async fn create(&self, product: NewProduct) -> CatalogResult<Product> {
        let product = product.into_product(ProductId::new());

        sqlx::query(
            r#"
            INSERT INTO products (product_id, description, img_url, link, tags)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.description)
        .bind(&product.img_url)
        .bind(&product.link)
        .bind(&product.tags)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    async fn edit(&self, id: ProductId, change: ProductChange) -> CatalogResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products SET
                description = COALESCE($2, description),
                img_url = COALESCE($3, img_url),
                link = COALESCE($4, link),
                tags = COALESCE($5, tags)
            WHERE product_id = $1
            RETURNING product_id, description, img_url, link, tags
            "#,
        )
        .bind(id.as_uuid())
        .bind(change.description)
        .bind(change.img_url)
        .bind(change.link)
        .bind(change.tags)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn remove(&self, id: ProductId) -> CatalogResult<bool> {
        let deleted = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Order Repository Implementation
// ============================================================================

impl OrderRepository for PgCatalogRepository {
    async fn create(&self, draft: OrderDraft) -> CatalogResult<Order> {
        let order = draft.into_order(OrderId::new());
        let products: Vec<Uuid> = order.products.iter().map(|id| id.into_uuid()).collect();

        sqlx::query(
            r#"
            INSERT INTO orders (order_id, username, products, status)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(&order.username)
        .bind(&products)
        .bind(order.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(order)
    }

    async fn list(&self, query: &OrderQuery) -> CatalogResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT order_id, username, products, status
            FROM orders
            WHERE ($1::UUID IS NULL OR $1 = ANY(products))
              AND ($2::TEXT IS NULL OR status = $2)
              AND ($3::TEXT IS NULL OR username = $3)
            ORDER BY seq
            OFFSET $4
            LIMIT $5
            "#,
        )
        .bind(query.product_id.map(|id| id.into_uuid()))
        .bind(query.status.map(|status| status.as_str()))
        .bind(query.username.as_deref())
        .bind(i64::from(query.offset))
        .bind(i64::from(query.limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgCatalogRepository {
    async fn create(&self, user: &User) -> CatalogResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, email, secret_hash, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.secret_hash.as_phc_string())
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result.map_err(CatalogError::from) {
            Ok(_) => Ok(()),
            Err(err) if err.kind() == ErrorKind::Conflict => Err(CatalogError::UsernameTaken),
            Err(err) => Err(err),
        }
    }

    async fn find_by_username(&self, username: &str) -> CatalogResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT username, email, secret_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgCatalogRepository {
    async fn create(&self, session: &Session) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                session_id,
                username,
                is_admin,
                created_at_ms,
                expires_at_ms
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(&session.username)
        .bind(session.is_admin)
        .bind(session.created_at_ms)
        .bind(session.expires_at_ms)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, session_id: SessionId) -> CatalogResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT session_id, username, is_admin, created_at_ms, expires_at_ms
            FROM sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SessionRow::into_session))
    }

    async fn cleanup_expired(&self) -> CatalogResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM sessions WHERE expires_at_ms <= $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::debug!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProductRow {
    product_id: Uuid,
    description: String,
    img_url: Option<String>,
    link: Option<String>,
    tags: Vec<String>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product {
            id: ProductId::from_uuid(self.product_id),
            description: self.description,
            img_url: self.img_url,
            link: self.link,
            tags: self.tags,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    order_id: Uuid,
    username: String,
    products: Vec<Uuid>,
    status: String,
}

impl OrderRow {
    fn into_order(self) -> CatalogResult<Order> {
        let status = self
            .status
            .parse::<OrderStatus>()
            .map_app_err(ErrorKind::InternalServerError, "Invalid order status")?;

        Ok(Order {
            id: OrderId::from_uuid(self.order_id),
            username: self.username,
            products: self.products.into_iter().map(ProductId::from_uuid).collect(),
            status,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    username: String,
    email: String,
    secret_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> CatalogResult<User> {
        let secret_hash = HashedSecret::from_phc_string(self.secret_hash)
            .map_app_err(ErrorKind::InternalServerError, "Invalid secret_hash")?;

        Ok(User {
            username: self.username,
            email: self.email,
            secret_hash,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    username: String,
    is_admin: bool,
    created_at_ms: i64,
    expires_at_ms: i64,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session {
            session_id: SessionId::from_uuid(self.session_id),
            username: self.username,
            is_admin: self.is_admin,
            created_at_ms: self.created_at_ms,
            expires_at_ms: self.expires_at_ms,
        }
    }
}
