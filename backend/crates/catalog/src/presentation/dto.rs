//! API DTOs (Data Transfer Objects)
//!
//! JSON bodies live in `kernel::model`, shared with the client. Only the
//! query strings are parsed here.

use std::str::FromStr;

use kernel::id::ProductId;
use kernel::model::OrderStatus;
use serde::Deserialize;

use crate::domain::query::{OrderQuery, ProductQuery};
use crate::error::{CatalogError, CatalogResult};

/// Raw `GET /products` query
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsParams {
    pub offset: Option<String>,
    pub limit: Option<String>,
    pub tag: Option<String>,
}

impl ListProductsParams {
    pub fn into_query(self) -> CatalogResult<ProductQuery> {
        let defaults = ProductQuery::default();

        Ok(ProductQuery {
            offset: parse_or("offset", self.offset, defaults.offset)?,
            limit: parse_or("limit", self.limit, defaults.limit)?,
            tag: non_empty(self.tag),
        })
    }
}

/// Raw `GET /orders` query
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersParams {
    pub offset: Option<String>,
    pub limit: Option<String>,
    pub product_id: Option<String>,
    pub status: Option<String>,
}

impl ListOrdersParams {
    /// The owner filter is left empty; scoping fills it in.
    pub fn into_query(self) -> CatalogResult<OrderQuery> {
        let defaults = OrderQuery::default();

        let product_id = non_empty(self.product_id)
            .map(|id| ProductId::from_str(&id))
            .transpose()
            .map_err(|_| CatalogError::InvalidQuery("productId".to_string()))?;

        let status = non_empty(self.status)
            .map(|status| status.parse::<OrderStatus>())
            .transpose()
            .map_err(|e| CatalogError::InvalidQuery(e.to_string()))?;

        Ok(OrderQuery {
            offset: parse_or("offset", self.offset, defaults.offset)?,
            limit: parse_or("limit", self.limit, defaults.limit)?,
            product_id,
            status,
            username: None,
        })
    }
}

/// Empty values count as absent (`?tag=`)
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_or(name: &str, value: Option<String>, default: u32) -> CatalogResult<u32> {
    match non_empty(value) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| CatalogError::InvalidQuery(name.to_string())),
    }
}
