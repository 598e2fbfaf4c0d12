//! Wishlist API trait

use async_trait::async_trait;

use crate::client::models::WishlistItem;
use crate::error::Result;

#[async_trait]
pub trait WishlistApi: Send + Sync {
    async fn get_wishlist(&self) -> Result<Vec<WishlistItem>>;

    async fn add_to_wishlist(&self, product_id: &str) -> Result<Vec<WishlistItem>>;

    async fn remove_from_wishlist(&self, product_id: &str) -> Result<Vec<WishlistItem>>;

    fn invalidate_wishlist(&self) -> usize;
}
