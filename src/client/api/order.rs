//! Order API trait

use async_trait::async_trait;

use crate::client::models::{CreateOrderRequest, Order};
use crate::error::Result;

/// Checkout and order history (authenticated)
#[async_trait]
pub trait OrderApi: Send + Sync {
    /// Place an order. Never cached or coalesced with a different body.
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order>;

    /// Orders of the signed-in user (short TTL).
    async fn my_orders(&self) -> Result<Vec<Order>>;

    async fn get_order(&self, id: &str) -> Result<Order>;

    fn invalidate_orders(&self) -> usize;
}
