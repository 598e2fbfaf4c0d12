//! Order display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{format_datetime, format_money};
use storefront::client::models::Order;

/// Order display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct OrderDisplay {
    #[tabled(rename = "ORDER ID")]
    pub id: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "ITEMS")]
    pub items: u32,

    #[tabled(rename = "TOTAL")]
    pub total: String,

    #[tabled(rename = "PLACED")]
    pub placed: String,
}

impl From<Order> for OrderDisplay {
    fn from(order: Order) -> Self {
        Self {
            items: order.items.iter().map(|i| i.quantity).sum(),
            total: format_money(order.total),
            placed: format_datetime(order.created_at.as_ref()),
            id: order.order_number.unwrap_or(order.id),
            status: order.status,
        }
    }
}
