//! Cart and wishlist display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{format_datetime, format_money, truncate_string};
use storefront::client::models::{CartItem, WishlistItem};

/// Cart line display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CartItemDisplay {
    /// Cart line ID, used by `cart update` and `cart remove`
    #[tabled(rename = "ITEM ID")]
    pub id: String,

    #[tabled(rename = "PRODUCT")]
    pub product: String,

    #[tabled(rename = "QTY")]
    pub quantity: u32,

    #[tabled(rename = "PRICE")]
    pub price: String,

    #[tabled(rename = "TOTAL")]
    pub total: String,
}

impl From<CartItem> for CartItemDisplay {
    fn from(item: CartItem) -> Self {
        let product = if item.name.is_empty() {
            item.product_id.clone()
        } else {
            truncate_string(&item.name, 40)
        };

        Self {
            total: format_money(item.line_total()),
            id: item.id,
            product,
            quantity: item.quantity,
            price: format_money(item.price),
        }
    }
}

/// Wishlist display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct WishlistDisplay {
    #[tabled(rename = "PRODUCT ID")]
    pub product_id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "PRICE")]
    pub price: String,

    #[tabled(rename = "ADDED")]
    pub added: String,
}

impl From<WishlistItem> for WishlistDisplay {
    fn from(item: WishlistItem) -> Self {
        Self {
            added: format_datetime(item.added_at.as_ref()),
            product_id: item.product_id,
            name: item.name,
            price: format_money(item.price),
        }
    }
}
