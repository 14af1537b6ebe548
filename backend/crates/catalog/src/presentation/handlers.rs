//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use kernel::id::ProductId;
use kernel::model::{
    LoginRequest, NewOrder, NewProduct, NewUser, Order, Product, ProductChange, SuccessResponse,
    UserView,
};
use platform::password::ClearTextSecret;

use crate::application::access::{
    require_admin, require_identity, scope_new_order, scope_order_query,
};
use crate::application::config::CatalogConfig;
use crate::application::{RegisterUserUseCase, SignInInput, SignInUseCase};
use crate::domain::repository::{CatalogRepository, OrderRepository, ProductRepository};
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{ListOrdersParams, ListProductsParams};
use crate::presentation::middleware::Caller;

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<R>
where
    R: CatalogRepository,
{
    pub repo: Arc<R>,
    pub config: Arc<CatalogConfig>,
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R>(
    State(state): State<CatalogAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: CatalogRepository,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let input = SignInInput {
        identifier: req.identifier,
        secret: ClearTextSecret::new(req.secret),
    };

    let output = use_case.execute(input).await?;

    let cookie = state
        .config
        .session_cookie()
        .set_cookie_header(&output.session_token)
        .map_err(|e| CatalogError::Internal(e.to_string()))?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SuccessResponse::OK),
    ))
}

// ============================================================================
// Products
// ============================================================================

/// GET /products/{id}
pub async fn get_product<R>(
    State(state): State<CatalogAppState<R>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<Product>>
where
    R: CatalogRepository,
{
    // Unknown and malformed ids get the same answer as an unrouted path
    let Ok(id) = id.parse::<ProductId>() else {
        return Err(not_found().await);
    };

    match state.repo.get(id).await? {
        Some(product) => Ok(Json(product)),
        None => Err(not_found().await),
    }
}

/// GET /products
pub async fn list_products<R>(
    State(state): State<CatalogAppState<R>>,
    Query(params): Query<ListProductsParams>,
) -> CatalogResult<Json<Vec<Product>>>
where
    R: CatalogRepository,
{
    let query = params.into_query()?;
    let products = ProductRepository::list(state.repo.as_ref(), &query).await?;
    Ok(Json(products))
}

/// POST /products (admin)
pub async fn create_product<R>(
    State(state): State<CatalogAppState<R>>,
    caller: Caller,
    Json(req): Json<NewProduct>,
) -> CatalogResult<Json<Product>>
where
    R: CatalogRepository,
{
    let admin = require_admin(caller.identity())?;

    let product = ProductRepository::create(state.repo.as_ref(), req).await?;

    tracing::info!(product_id = %product.id, admin = %admin, "Product created");

    Ok(Json(product))
}

/// PUT /products/{id} (admin)
pub async fn edit_product<R>(
    State(state): State<CatalogAppState<R>>,
    caller: Caller,
    Path(id): Path<String>,
    Json(req): Json<ProductChange>,
) -> CatalogResult<Json<Product>>
where
    R: CatalogRepository,
{
    let admin = require_admin(caller.identity())?;
    let id: ProductId = id.parse().map_err(|_| CatalogError::ProductNotFound)?;

    let product = state
        .repo
        .edit(id, req)
        .await?
        .ok_or(CatalogError::ProductNotFound)?;

    tracing::info!(product_id = %product.id, admin = %admin, "Product edited");

    Ok(Json(product))
}

/// DELETE /products/{id} (admin)
pub async fn delete_product<R>(
    State(state): State<CatalogAppState<R>>,
    caller: Caller,
    Path(id): Path<String>,
) -> CatalogResult<Json<SuccessResponse>>
where
    R: CatalogRepository,
{
    let admin = require_admin(caller.identity())?;
    let id: ProductId = id.parse().map_err(|_| CatalogError::ProductNotFound)?;

    let removed = state.repo.remove(id).await?;

    tracing::info!(product_id = %id, admin = %admin, removed, "Product deleted");

    Ok(Json(SuccessResponse::OK))
}

// ============================================================================
// Orders
// ============================================================================

/// POST /orders (session)
pub async fn create_order<R>(
    State(state): State<CatalogAppState<R>>,
    caller: Caller,
    Json(req): Json<NewOrder>,
) -> CatalogResult<Json<Order>>
where
    R: CatalogRepository,
{
    let identity = require_identity(caller.identity())?;
    let draft = scope_new_order(req, identity);

    let order = OrderRepository::create(state.repo.as_ref(), draft).await?;

    tracing::info!(
        order_id = %order.id,
        username = %order.username,
        caller = %identity,
        "Order created"
    );

    Ok(Json(order))
}

/// GET /orders (session, scoped to the caller unless admin)
pub async fn list_orders<R>(
    State(state): State<CatalogAppState<R>>,
    caller: Caller,
    Query(params): Query<ListOrdersParams>,
) -> CatalogResult<Json<Vec<Order>>>
where
    R: CatalogRepository,
{
    let identity = require_identity(caller.identity())?;
    let query = scope_order_query(params.into_query()?, identity);

    let orders = OrderRepository::list(state.repo.as_ref(), &query).await?;
    Ok(Json(orders))
}

// ============================================================================
// Users
// ============================================================================

/// POST /users
pub async fn create_user<R>(
    State(state): State<CatalogAppState<R>>,
    Json(req): Json<NewUser>,
) -> CatalogResult<Json<UserView>>
where
    R: CatalogRepository,
{
    let use_case = RegisterUserUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.execute(req).await?;
    Ok(Json(user))
}

// ============================================================================
// Fallback
// ============================================================================

/// Router fallback for unknown paths
pub async fn not_found() -> CatalogError {
    CatalogError::NotFound
}
