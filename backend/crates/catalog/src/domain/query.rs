//! Listing Queries
//!
//! Paging and filters as the repositories see them, after parsing and after
//! ownership scoping.

use kernel::id::ProductId;
use kernel::model::{Order, OrderStatus, Product};

pub const DEFAULT_OFFSET: u32 = 0;
pub const DEFAULT_PRODUCT_LIMIT: u32 = 10;
pub const DEFAULT_ORDER_LIMIT: u32 = 25;

/// `GET /products` query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub offset: u32,
    pub limit: u32,
    /// Only products carrying this tag
    pub tag: Option<String>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            limit: DEFAULT_PRODUCT_LIMIT,
            tag: None,
        }
    }
}

impl ProductQuery {
    pub fn matches(&self, product: &Product) -> bool {
        self.tag
            .as_ref()
            .is_none_or(|tag| product.tags.iter().any(|t| t == tag))
    }
}

/// `GET /orders` query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuery {
    pub offset: u32,
    pub limit: u32,
    /// Only orders containing this product
    pub product_id: Option<ProductId>,
    pub status: Option<OrderStatus>,
    /// Owner filter; forced for non-admin callers
    pub username: Option<String>,
}

impl Default for OrderQuery {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            limit: DEFAULT_ORDER_LIMIT,
            product_id: None,
            status: None,
            username: None,
        }
    }
}

impl OrderQuery {
    pub fn matches(&self, order: &Order) -> bool {
        self.product_id
            .is_none_or(|id| order.products.contains(&id))
            && self.status.is_none_or(|status| order.status == status)
            && self
                .username
                .as_ref()
                .is_none_or(|username| &order.username == username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::OrderId;

    fn order(username: &str, products: Vec<ProductId>, status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(),
            username: username.to_string(),
            products,
            status,
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ProductQuery::default().offset, 0);
        assert_eq!(ProductQuery::default().limit, 10);
        assert_eq!(OrderQuery::default().offset, 0);
        assert_eq!(OrderQuery::default().limit, 25);
    }

    #[test]
    fn test_order_query_filters_combine() {
        let lamp = ProductId::new();
        let query = OrderQuery {
            product_id: Some(lamp),
            status: Some(OrderStatus::Pending),
            username: Some("alice".to_string()),
            ..Default::default()
        };

        assert!(query.matches(&order("alice", vec![lamp], OrderStatus::Pending)));
        assert!(!query.matches(&order("bob", vec![lamp], OrderStatus::Pending)));
        assert!(!query.matches(&order("alice", vec![], OrderStatus::Pending)));
        assert!(!query.matches(&order("alice", vec![lamp], OrderStatus::Created)));
    }

    #[test]
    fn test_product_query_tag_filter() {
        let product = Product {
            id: ProductId::new(),
            description: "Lamp".to_string(),
            img_url: None,
            link: None,
            tags: vec!["home".to_string(), "light".to_string()],
        };

        assert!(ProductQuery::default().matches(&product));
        let query = ProductQuery {
            tag: Some("light".to_string()),
            ..Default::default()
        };
        assert!(query.matches(&product));
        let query = ProductQuery {
            tag: Some("garden".to_string()),
            ..Default::default()
        };
        assert!(!query.matches(&product));
    }
}
