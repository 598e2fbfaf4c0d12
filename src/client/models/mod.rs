//! Storefront API data models
//!
//! Domain types carried in the `data` field of backend envelopes,
//! organized by resource.

mod cart;
mod category;
mod chat;
mod order;
mod page;
mod product;
mod wishlist;

pub use cart::{AddToCartRequest, Cart, CartItem, UpdateCartItemRequest};
pub use category::{Category, CategoryInput};
pub use chat::{ChatMessage, SendChatRequest};
pub use order::{Address, CreateOrderRequest, Order, OrderItem, OrderLine};
pub use page::{ContentPage, ContentPageInput};
pub use product::{Product, ProductInput};
pub use wishlist::{AddToWishlistRequest, WishlistItem};

use serde::Deserialize;

/// Resource ids arrive as strings from document stores and as integers
/// from relational ones; both are kept as strings.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::de::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdValue {
        Integer(i64),
        String(String),
    }

    match IdValue::deserialize(deserializer)? {
        IdValue::Integer(i) => Ok(i.to_string()),
        IdValue::String(s) => Ok(s),
    }
}

/// Custom deserializer for prices that may come as strings (decimal columns)
pub(crate) fn deserialize_price<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: serde::de::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PriceValue {
        Number(f64),
        String(String),
    }

    match PriceValue::deserialize(deserializer)? {
        PriceValue::Number(n) => Ok(n),
        PriceValue::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
