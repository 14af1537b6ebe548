//! Catalog Client
//!
//! Typed operations over the catalog HTTP API. Operations that need a
//! session run through [`CatalogClient::with_login`], which logs in first
//! when the client has credentials but no session yet.

use std::future::Future;

use kernel::id::ProductId;
use kernel::model::{
    NewOrder, NewProduct, NewUser, Order, OrderStatus, Product, ProductChange, SuccessResponse,
    UserView,
};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::{AuthState, Authenticator, SessionAcknowledged};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;
use crate::transport::{HttpTransport, Transport, TransportResponse};

/// Paging and tag filter for [`CatalogClient::list_products`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListOptions {
    pub offset: u32,
    pub limit: u32,
    pub tag: Option<String>,
}

impl Default for ProductListOptions {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 25,
            tag: None,
        }
    }
}

/// Paging and filters for [`CatalogClient::list_orders`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderListOptions {
    pub offset: u32,
    pub limit: u32,
    pub status: Option<OrderStatus>,
    pub product_id: Option<ProductId>,
}

impl Default for OrderListOptions {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 25,
            status: None,
            product_id: None,
        }
    }
}

pub struct CatalogClient<T = HttpTransport> {
    endpoint: Url,
    transport: T,
    auth: Authenticator,
}

impl CatalogClient<HttpTransport> {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let transport = HttpTransport::new(config.timeout)?;
        Self::with_transport(config, transport)
    }

    /// Cookie jar holding this client's session
    pub fn session(&self) -> &SessionStore {
        self.transport.session()
    }
}

impl<T> CatalogClient<T>
where
    T: Transport + Sync,
{
    pub fn with_transport(config: ClientConfig, transport: T) -> ClientResult<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| ClientError::Transport(format!("invalid endpoint: {}", e)))?;
        let login_url = join_path(&endpoint, "/login").to_string();

        Ok(Self {
            endpoint,
            transport,
            auth: Authenticator::new(config.credentials, login_url),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn auth_state(&self) -> AuthState {
        self.auth.state().await
    }

    /// Log in with the configured credentials
    pub async fn login(&self) -> ClientResult<SessionAcknowledged> {
        self.auth.login(&self.transport).await
    }

    /// Run `op`, logging in first if the client has credentials and is not
    /// yet authenticated. A failed login is returned without running `op`.
    pub async fn with_login<F, Fut, D>(&self, op: F) -> ClientResult<D>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<D>>,
    {
        self.auth.login_if_needed(&self.transport).await?;
        op().await
    }

    // ========================================================================
    // Products
    // ========================================================================

    /// Fetch one product. A missing product is `Ok(None)`.
    pub async fn get_product(&self, id: ProductId) -> ClientResult<Option<Product>> {
        let url = self.url(&format!("/products/{}", id));
        match self.call(Method::GET, url, None).await {
            Ok(product) => Ok(Some(product)),
            Err(ClientError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn list_products(&self, options: &ProductListOptions) -> ClientResult<Vec<Product>> {
        let mut url = self.url("/products");
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("offset", &options.offset.to_string())
                .append_pair("limit", &options.limit.to_string());
            if let Some(tag) = &options.tag {
                query.append_pair("tag", tag);
            }
        }
        self.call(Method::GET, url, None).await
    }

    pub async fn create_product(&self, product: &NewProduct) -> ClientResult<Product> {
        let body = to_body(product)?;
        self.with_login(|| self.call(Method::POST, self.url("/products"), Some(body)))
            .await
    }

    pub async fn edit_product(
        &self,
        id: ProductId,
        change: &ProductChange,
    ) -> ClientResult<Product> {
        let body = to_body(change)?;
        let url = self.url(&format!("/products/{}", id));
        self.with_login(|| self.call(Method::PUT, url, Some(body)))
            .await
    }

    pub async fn delete_product(&self, id: ProductId) -> ClientResult<SuccessResponse> {
        let url = self.url(&format!("/products/{}", id));
        self.with_login(|| self.call(Method::DELETE, url, None))
            .await
    }

    // ========================================================================
    // Orders
    // ========================================================================

    pub async fn create_order(&self, order: &NewOrder) -> ClientResult<Order> {
        let body = to_body(order)?;
        self.with_login(|| self.call(Method::POST, self.url("/orders"), Some(body)))
            .await
    }

    pub async fn list_orders(&self, options: &OrderListOptions) -> ClientResult<Vec<Order>> {
        let mut url = self.url("/orders");
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("offset", &options.offset.to_string())
                .append_pair("limit", &options.limit.to_string());
            if let Some(status) = options.status {
                query.append_pair("status", status.as_str());
            }
            if let Some(product_id) = options.product_id {
                query.append_pair("productId", &product_id.to_string());
            }
        }
        self.with_login(|| self.call(Method::GET, url, None)).await
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn create_user(&self, user: &NewUser) -> ClientResult<UserView> {
        let body = to_body(user)?;
        self.call(Method::POST, self.url("/users"), Some(body)).await
    }

    // ========================================================================
    // Plumbing
    // ========================================================================

    fn url(&self, path: &str) -> Url {
        join_path(&self.endpoint, path)
    }

    async fn call<D>(&self, method: Method, url: Url, body: Option<Value>) -> ClientResult<D>
    where
        D: DeserializeOwned,
    {
        let response = self.transport.request(method, url.as_str(), body).await?;
        decode(response)
    }
}

/// Append `path` to the endpoint's own path, keeping any prefix
fn join_path(endpoint: &Url, path: &str) -> Url {
    let mut url = endpoint.clone();
    let base = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{}{}", base, path));
    url
}

fn to_body<S: serde::Serialize>(value: &S) -> ClientResult<Value> {
    serde_json::to_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

fn decode<D: DeserializeOwned>(response: TransportResponse) -> ClientResult<D> {
    if response.status != 200 {
        return Err(ClientError::from_response(
            response.status,
            response.body.as_ref(),
        ));
    }

    serde_json::from_value(response.body.unwrap_or(Value::Null))
        .map_err(|e| ClientError::Decode(e.to_string()))
}
