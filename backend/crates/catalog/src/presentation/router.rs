//! Catalog Router

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::application::config::CatalogConfig;
use crate::domain::repository::CatalogRepository;
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};
use crate::presentation::middleware::attach_identity;

/// Create the catalog router with PostgreSQL repository
pub fn catalog_router(repo: PgCatalogRepository, config: CatalogConfig) -> Router {
    catalog_router_generic(repo, config)
}

/// Create a catalog router for any repository implementation
pub fn catalog_router_generic<R>(repo: R, config: CatalogConfig) -> Router
where
    R: CatalogRepository,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/login", post(handlers::login::<R>))
        .route(
            "/products",
            get(handlers::list_products::<R>).post(handlers::create_product::<R>),
        )
        .route(
            "/products/{id}",
            get(handlers::get_product::<R>)
                .put(handlers::edit_product::<R>)
                .delete(handlers::delete_product::<R>),
        )
        .route(
            "/orders",
            get(handlers::list_orders::<R>).post(handlers::create_order::<R>),
        )
        .route("/users", post(handlers::create_user::<R>))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            attach_identity::<R>,
        ))
        .with_state(state)
}
