//! HTTP Transport
//!
//! The seam between the client logic and the network. `HttpTransport` is the
//! real implementation; tests substitute their own.

use std::time::Duration;

use reqwest::Method;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::session::SessionStore;

/// Status and decoded JSON body of a response
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    /// `None` for an empty or non-JSON body
    pub body: Option<Value>,
}

/// Transport trait
#[trait_variant::make(Transport: Send)]
pub trait LocalTransport {
    /// Network failures come back as [`ClientError::Transport`]; any HTTP
    /// status is a successful transport call.
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
    ) -> ClientResult<TransportResponse>;
}

/// `reqwest`-backed transport with a private cookie jar
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    session: SessionStore,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> ClientResult<Self> {
        let session = SessionStore::new();

        let client = reqwest::Client::builder()
            .cookie_provider(session.jar())
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self { client, session })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}

impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
    ) -> ClientResult<TransportResponse> {
        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        tracing::debug!(%method, url, status, "Catalog request");

        let body = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice(&bytes).ok()
        };

        Ok(TransportResponse { status, body })
    }
}
