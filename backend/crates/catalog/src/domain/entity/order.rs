//! Order Draft
//!
//! An order request after ownership scoping: the owner is always known.

use kernel::id::{OrderId, ProductId};
use kernel::model::{Order, OrderStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub username: String,
    pub products: Vec<ProductId>,
    pub status: OrderStatus,
}

impl OrderDraft {
    pub fn into_order(self, id: OrderId) -> Order {
        Order {
            id,
            username: self.username,
            products: self.products,
            status: self.status,
        }
    }
}
