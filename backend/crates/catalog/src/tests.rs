//! Router-level tests for the catalog crate
//! Drives the full middleware + handler stack with the in-memory backend.

#[cfg(test)]
mod support {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::config::CatalogConfig;
    use crate::domain::repository::CatalogRepository;
    use crate::presentation::router::catalog_router_generic;

    pub const ADMIN: &str = "admin";
    pub const ADMIN_SECRET: &str = "open sesame";

    pub fn config() -> CatalogConfig {
        CatalogConfig::development().with_admin(ADMIN, ADMIN_SECRET)
    }

    pub fn app<R: CatalogRepository>(repo: R) -> Router {
        catalog_router_generic(repo, config())
    }

    pub struct Reply {
        pub status: StatusCode,
        pub set_cookie: Option<String>,
        pub body: Value,
    }

    pub async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> Reply {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        Reply {
            status,
            set_cookie,
            body,
        }
    }

    /// Log in and return the `Cookie` header value for later requests
    pub async fn login(app: &Router, identifier: &str, secret: &str) -> String {
        let reply = send(
            app,
            Method::POST,
            "/login",
            None,
            Some(json!({ "identifier": identifier, "secret": secret })),
        )
        .await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body, json!({ "success": true }));

        let set_cookie = reply.set_cookie.expect("login sets a cookie");
        set_cookie.split(';').next().unwrap().to_string()
    }

    pub async fn register_and_login(app: &Router, username: &str) -> String {
        let reply = send(
            app,
            Method::POST,
            "/users",
            None,
            Some(json!({
                "username": username,
                "secret": "pw",
                "email": format!("{username}@x.com"),
            })),
        )
        .await;
        assert_eq!(reply.status, StatusCode::OK);
        login(app, username, "pw").await
    }
}

#[cfg(test)]
mod counting {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use kernel::id::{ProductId, SessionId};
    use kernel::model::{NewProduct, Order, Product, ProductChange};

    use crate::domain::entity::{order::OrderDraft, session::Session, user::User};
    use crate::domain::query::{OrderQuery, ProductQuery};
    use crate::domain::repository::{
        OrderRepository, ProductRepository, SessionRepository, UserRepository,
    };
    use crate::error::CatalogResult;
    use crate::infra::memory::MemoryCatalogRepository;

    /// Memory repository that counts product and order calls
    #[derive(Clone, Default)]
    pub struct CountingRepository {
        inner: MemoryCatalogRepository,
        pub product_calls: Arc<AtomicUsize>,
        pub order_calls: Arc<AtomicUsize>,
    }

    impl CountingRepository {
        pub fn product_calls(&self) -> usize {
            self.product_calls.load(Ordering::SeqCst)
        }

        pub fn order_calls(&self) -> usize {
            self.order_calls.load(Ordering::SeqCst)
        }

        fn hit_products(&self) {
            self.product_calls.fetch_add(1, Ordering::SeqCst);
        }

        fn hit_orders(&self) {
            self.order_calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl ProductRepository for CountingRepository {
        async fn get(&self, id: ProductId) -> CatalogResult<Option<Product>> {
            self.hit_products();
            self.inner.get(id).await
        }

        async fn list(&self, query: &ProductQuery) -> CatalogResult<Vec<Product>> {
            self.hit_products();
            ProductRepository::list(&self.inner, query).await
        }

        async fn create(&self, product: NewProduct) -> CatalogResult<Product> {
            self.hit_products();
            ProductRepository::create(&self.inner, product).await
        }

        async fn edit(
            &self,
            id: ProductId,
            change: ProductChange,
        ) -> CatalogResult<Option<Product>> {
            self.hit_products();
            self.inner.edit(id, change).await
        }

        async fn remove(&self, id: ProductId) -> CatalogResult<bool> {
            self.hit_products();
            self.inner.remove(id).await
        }
    }

    impl OrderRepository for CountingRepository {
        async fn create(&self, draft: OrderDraft) -> CatalogResult<Order> {
            self.hit_orders();
            OrderRepository::create(&self.inner, draft).await
        }

        async fn list(&self, query: &OrderQuery) -> CatalogResult<Vec<Order>> {
            self.hit_orders();
            OrderRepository::list(&self.inner, query).await
        }
    }

    impl UserRepository for CountingRepository {
        async fn create(&self, user: &User) -> CatalogResult<()> {
            UserRepository::create(&self.inner, user).await
        }

        async fn find_by_username(&self, username: &str) -> CatalogResult<Option<User>> {
            self.inner.find_by_username(username).await
        }
    }

    impl SessionRepository for CountingRepository {
        async fn create(&self, session: &Session) -> CatalogResult<()> {
            SessionRepository::create(&self.inner, session).await
        }

        async fn find(&self, session_id: SessionId) -> CatalogResult<Option<Session>> {
            self.inner.find(session_id).await
        }

        async fn cleanup_expired(&self) -> CatalogResult<u64> {
            self.inner.cleanup_expired().await
        }
    }
}

#[cfg(test)]
mod access_tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use super::counting::CountingRepository;
    use super::support::*;
    use crate::infra::memory::MemoryCatalogRepository;

    #[tokio::test]
    async fn test_user_cannot_mutate_products() {
        let repo = CountingRepository::default();
        let app = app(repo.clone());
        let alice = register_and_login(&app, "alice").await;
        let some_id = kernel::id::ProductId::new().to_string();
        let item = format!("/products/{some_id}");

        let attempts = [
            (Method::POST, "/products", Some(json!({ "description": "Lamp" }))),
            (Method::PUT, item.as_str(), Some(json!({ "description": "Lamp" }))),
            (Method::DELETE, item.as_str(), None),
        ];

        for (method, uri, body) in attempts {
            for cookie in [Some(alice.as_str()), None] {
                let reply = send(&app, method.clone(), uri, cookie, body.clone()).await;
                assert_eq!(reply.status, StatusCode::FORBIDDEN, "{method} {uri}");
                assert_eq!(reply.body, json!({ "error": "Forbidden" }));
            }
        }

        assert_eq!(repo.product_calls(), 0);
    }

    #[tokio::test]
    async fn test_anonymous_orders_need_login() {
        let repo = CountingRepository::default();
        let app = app(repo.clone());

        let reply = send(&app, Method::GET, "/orders", None, None).await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

        let reply = send(&app, Method::POST, "/orders", None, Some(json!({ "products": [] }))).await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

        assert_eq!(repo.order_calls(), 0);
    }

    #[tokio::test]
    async fn test_order_owner_is_forced_to_caller() {
        let app = app(MemoryCatalogRepository::new());
        let alice = register_and_login(&app, "alice").await;

        let reply = send(
            &app,
            Method::POST,
            "/orders",
            Some(&alice),
            Some(json!({ "products": [], "username": "mallory" })),
        )
        .await;

        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["username"], "alice");
        assert_eq!(reply.body["status"], "CREATED");
    }

    #[tokio::test]
    async fn test_order_listing_is_scoped() {
        let app = app(MemoryCatalogRepository::new());
        let alice = register_and_login(&app, "alice").await;
        let bob = register_and_login(&app, "bob").await;
        let admin = login(&app, ADMIN, ADMIN_SECRET).await;

        for cookie in [&alice, &bob, &bob] {
            let reply = send(
                &app,
                Method::POST,
                "/orders",
                Some(cookie),
                Some(json!({ "products": [] })),
            )
            .await;
            assert_eq!(reply.status, StatusCode::OK);
        }

        // Asking for someone else's orders still yields only your own
        let reply = send(&app, Method::GET, "/orders?username=bob", Some(&alice), None).await;
        let orders = reply.body.as_array().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0]["username"], "alice");

        let reply = send(&app, Method::GET, "/orders", Some(&admin), None).await;
        assert_eq!(reply.body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_admin_orders_on_behalf() {
        let app = app(MemoryCatalogRepository::new());
        let admin = login(&app, ADMIN, ADMIN_SECRET).await;

        let reply = send(
            &app,
            Method::POST,
            "/orders",
            Some(&admin),
            Some(json!({ "products": [], "username": "carol", "status": "PENDING" })),
        )
        .await;

        assert_eq!(reply.body["username"], "carol");
        assert_eq!(reply.body["status"], "PENDING");
    }

    #[tokio::test]
    async fn test_forged_cookie_is_anonymous() {
        let app = app(MemoryCatalogRepository::new());
        let forged = format!("catalog_session={}.AAAA", kernel::id::SessionId::new());

        let reply = send(&app, Method::GET, "/orders", Some(&forged), None).await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

        let reply = send(&app, Method::GET, "/products", Some(&forged), None).await;
        assert_eq!(reply.status, StatusCode::OK);
    }
}

#[cfg(test)]
mod login_tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use super::support::*;
    use crate::infra::memory::MemoryCatalogRepository;

    #[tokio::test]
    async fn test_login_sets_session_cookie() {
        let app = app(MemoryCatalogRepository::new());
        let reply = send(
            &app,
            Method::POST,
            "/login",
            None,
            Some(json!({ "identifier": ADMIN, "secret": ADMIN_SECRET })),
        )
        .await;

        assert_eq!(reply.status, StatusCode::OK);
        let cookie = reply.set_cookie.unwrap();
        assert!(cookie.starts_with("catalog_session="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
    }

    #[tokio::test]
    async fn test_bad_credentials() {
        let app = app(MemoryCatalogRepository::new());
        register_and_login(&app, "alice").await;

        for (identifier, secret) in [("alice", "wrong"), ("nobody", "pw"), (ADMIN, "pw")] {
            let reply = send(
                &app,
                Method::POST,
                "/login",
                None,
                Some(json!({ "identifier": identifier, "secret": secret })),
            )
            .await;
            assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
            assert_eq!(reply.body, json!({ "error": "Invalid credentials" }));
            assert!(reply.set_cookie.is_none());
        }
    }

    #[tokio::test]
    async fn test_admin_login_disabled_without_secret() {
        let app = crate::catalog_router_generic(
            MemoryCatalogRepository::new(),
            crate::CatalogConfig::development(),
        );
        let reply = send(
            &app,
            Method::POST,
            "/login",
            None,
            Some(json!({ "identifier": ADMIN, "secret": "" })),
        )
        .await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_session_is_anonymous() {
        let config = crate::CatalogConfig {
            session_ttl: std::time::Duration::ZERO,
            ..config()
        };
        let app = crate::catalog_router_generic(MemoryCatalogRepository::new(), config);
        let admin = login(&app, ADMIN, ADMIN_SECRET).await;

        let reply = send(
            &app,
            Method::POST,
            "/products",
            Some(&admin),
            Some(json!({ "description": "Lamp" })),
        )
        .await;
        assert_eq!(reply.status, StatusCode::FORBIDDEN);
    }
}

#[cfg(test)]
mod product_tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use super::support::*;
    use crate::infra::memory::MemoryCatalogRepository;

    #[tokio::test]
    async fn test_admin_product_lifecycle() {
        let app = app(MemoryCatalogRepository::new());
        let admin = login(&app, ADMIN, ADMIN_SECRET).await;

        let reply = send(
            &app,
            Method::POST,
            "/products",
            Some(&admin),
            Some(json!({ "description": "Lamp", "imgUrl": "http://img/lamp", "tags": ["light"] })),
        )
        .await;
        assert_eq!(reply.status, StatusCode::OK);
        let id = reply.body["id"].as_str().unwrap().to_string();
        assert_eq!(reply.body["imgUrl"], "http://img/lamp");

        let reply = send(&app, Method::GET, &format!("/products/{id}"), None, None).await;
        assert_eq!(reply.body["description"], "Lamp");

        let reply = send(
            &app,
            Method::PUT,
            &format!("/products/{id}"),
            Some(&admin),
            Some(json!({ "description": "Desk lamp" })),
        )
        .await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["description"], "Desk lamp");
        assert_eq!(reply.body["tags"], json!(["light"]));

        let reply = send(&app, Method::DELETE, &format!("/products/{id}"), Some(&admin), None).await;
        assert_eq!(reply.body, json!({ "success": true }));

        let reply = send(&app, Method::GET, &format!("/products/{id}"), None, None).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_products_are_not_found() {
        let app = app(MemoryCatalogRepository::new());
        let admin = login(&app, ADMIN, ADMIN_SECRET).await;
        let missing = kernel::id::ProductId::new();

        let fallback = send(&app, Method::GET, "/no/such/path", None, None).await;
        assert_eq!(fallback.status, StatusCode::NOT_FOUND);

        for uri in [format!("/products/{missing}"), "/products/not-a-uuid".to_string()] {
            let reply = send(&app, Method::GET, &uri, None, None).await;
            assert_eq!(reply.status, StatusCode::NOT_FOUND);
            assert_eq!(reply.body, fallback.body);
        }

        let reply = send(
            &app,
            Method::PUT,
            &format!("/products/{missing}"),
            Some(&admin),
            Some(json!({ "description": "x" })),
        )
        .await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_listing_defaults_and_paging() {
        let app = app(MemoryCatalogRepository::new());
        let admin = login(&app, ADMIN, ADMIN_SECRET).await;

        for i in 0..12 {
            let tags = if i % 3 == 0 { json!(["sale"]) } else { json!([]) };
            send(
                &app,
                Method::POST,
                "/products",
                Some(&admin),
                Some(json!({ "description": format!("p{i}"), "tags": tags })),
            )
            .await;
        }

        let reply = send(&app, Method::GET, "/products", None, None).await;
        assert_eq!(reply.body.as_array().unwrap().len(), 10);

        let reply = send(&app, Method::GET, "/products?offset=10&limit=5", None, None).await;
        let page = reply.body.as_array().unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0]["description"], "p10");

        let reply = send(&app, Method::GET, "/products?tag=sale", None, None).await;
        assert_eq!(reply.body.as_array().unwrap().len(), 4);

        let reply = send(&app, Method::GET, "/products?limit=lots", None, None).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_order_listing_default_limit() {
        let app = app(MemoryCatalogRepository::new());
        let admin = login(&app, ADMIN, ADMIN_SECRET).await;

        for _ in 0..30 {
            send(&app, Method::POST, "/orders", Some(&admin), Some(json!({}))).await;
        }

        let reply = send(&app, Method::GET, "/orders", Some(&admin), None).await;
        assert_eq!(reply.body.as_array().unwrap().len(), 25);
    }
}

#[cfg(test)]
mod user_tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use super::support::*;
    use crate::infra::memory::MemoryCatalogRepository;

    #[tokio::test]
    async fn test_create_user_returns_public_view() {
        let app = app(MemoryCatalogRepository::new());
        let reply = send(
            &app,
            Method::POST,
            "/users",
            None,
            Some(json!({ "username": "a", "secret": "x", "email": "a@x.com" })),
        )
        .await;

        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body, json!({ "username": "a", "email": "a@x.com" }));
    }

    #[tokio::test]
    async fn test_taken_usernames() {
        let app = app(MemoryCatalogRepository::new());
        register_and_login(&app, "alice").await;

        for username in ["alice", ADMIN] {
            let reply = send(
                &app,
                Method::POST,
                "/users",
                None,
                Some(json!({ "username": username, "secret": "x", "email": "e@x.com" })),
            )
            .await;
            assert_eq!(reply.status, StatusCode::CONFLICT);
        }
    }
}
