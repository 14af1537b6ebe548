//! Identity Middleware
//!
//! Resolves the caller from the session cookie on every request. Requests
//! without a live session continue anonymously; privilege checks happen in
//! the handlers.

use std::convert::Infallible;

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::Request;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::cookie::extract_cookie;

use crate::application::ResolveIdentityUseCase;
use crate::domain::entity::identity::Identity;
use crate::domain::repository::CatalogRepository;
use crate::presentation::handlers::CatalogAppState;

/// Attach the caller's [`Identity`] to the request extensions, if any
pub async fn attach_identity<R>(
    State(state): State<CatalogAppState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: CatalogRepository,
{
    let token = extract_cookie(req.headers(), &state.config.session_cookie_name);

    if let Some(token) = token {
        let use_case = ResolveIdentityUseCase::new(state.repo.clone(), state.config.clone());

        match use_case.execute(&token).await {
            Ok(Some(identity)) => {
                req.extensions_mut().insert(identity);
            }
            Ok(None) => {}
            Err(e) => return e.into_response(),
        }
    }

    next.run(req).await
}

/// The caller's identity, `None` for anonymous requests
#[derive(Debug, Clone)]
pub struct Caller(pub Option<Identity>);

impl Caller {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Caller(parts.extensions.get::<Identity>().cloned()))
    }
}
