//! Access Guard
//!
//! Privilege checks and ownership scoping. Everything here is a pure
//! function of the request and the caller's identity; handlers run these
//! before touching a repository.

use kernel::model::NewOrder;

use crate::domain::entity::{identity::Identity, order::OrderDraft};
use crate::domain::query::OrderQuery;
use crate::error::{CatalogError, CatalogResult};

/// Admin-only operations. Anonymous callers are refused the same way as
/// ordinary users.
pub fn require_admin(caller: Option<&Identity>) -> CatalogResult<&Identity> {
    match caller {
        Some(identity) if identity.is_admin => Ok(identity),
        _ => Err(CatalogError::Forbidden),
    }
}

/// Operations that need some logged-in caller
pub fn require_identity(caller: Option<&Identity>) -> CatalogResult<&Identity> {
    caller.ok_or(CatalogError::SessionRequired)
}

/// Pin the owner of a new order.
///
/// Non-admin callers always order for themselves, whatever the body says.
/// An admin may order on behalf of someone else and defaults to itself.
pub fn scope_new_order(order: NewOrder, caller: &Identity) -> OrderDraft {
    let username = match order.username {
        Some(username) if caller.is_admin => username,
        _ => caller.username.clone(),
    };

    OrderDraft {
        username,
        products: order.products,
        status: order.status.unwrap_or_default(),
    }
}

/// Restrict an order listing to what the caller may see.
///
/// Non-admin callers only see their own orders. Admin queries pass through.
pub fn scope_order_query(query: OrderQuery, caller: &Identity) -> OrderQuery {
    if caller.is_admin {
        query
    } else {
        OrderQuery {
            username: Some(caller.username.clone()),
            ..query
        }
    }
}
