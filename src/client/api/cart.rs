//! Cart API trait

use async_trait::async_trait;

use crate::client::models::Cart;
use crate::error::Result;

/// Cart operations for signed-in users and guest sessions
///
/// Every mutation returns the updated cart as the backend reports it.
#[async_trait]
pub trait CartApi: Send + Sync {
    /// Current cart contents (cached).
    async fn get_cart(&self) -> Result<Cart>;

    async fn add_to_cart(&self, product_id: &str, quantity: u32) -> Result<Cart>;

    /// Set the quantity of one cart line.
    async fn update_cart_item(&self, item_id: &str, quantity: u32) -> Result<Cart>;

    async fn remove_cart_item(&self, item_id: &str) -> Result<Cart>;

    async fn clear_cart(&self) -> Result<()>;

    /// Drop cached cart reads, after a mutation for example.
    fn invalidate_cart(&self) -> usize;
}
