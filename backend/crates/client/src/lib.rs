//! Catalog Client
//!
//! Client library for the catalog API.
//!
//! - `session` - private cookie jar holding the session
//! - `auth` - login and the client's authentication state
//! - `transport` - HTTP seam (`reqwest` by default)
//! - `client` - typed operations, with automatic login where a session is needed
//!
//! ```no_run
//! use catalog_client::{CatalogClient, ClientConfig};
//! use kernel::model::NewProduct;
//!
//! # async fn run() -> catalog_client::ClientResult<()> {
//! let client = CatalogClient::new(
//!     ClientConfig::new("http://localhost:1337").with_credentials("admin", "secret"),
//! )?;
//!
//! // Logs in on first use
//! let _product = client
//!     .create_product(&NewProduct {
//!         description: "Lamp".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod transport;

pub use auth::{AuthState, SessionAcknowledged};
pub use client::{CatalogClient, OrderListOptions, ProductListOptions};
pub use config::{ClientConfig, Credentials};
pub use error::{ClientError, ClientResult};
pub use session::SessionStore;
pub use transport::{HttpTransport, Transport, TransportResponse};
