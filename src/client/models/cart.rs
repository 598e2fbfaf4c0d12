//! Shopping cart models

use serde::{Deserialize, Serialize};

use super::{deserialize_id, deserialize_price};

/// The caller's cart, as returned by every cart endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,

    /// Cart total as computed by the backend
    #[serde(default, alias = "totalAmount", alias = "subtotal")]
    pub total: f64,
}

impl Cart {
    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One line of the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Cart line ID (used by update/remove)
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,

    #[serde(deserialize_with = "deserialize_id")]
    pub product_id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: f64,

    pub quantity: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Body of `POST /cart/add`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
    pub quantity: u32,
}

/// Body of `PUT /cart/items/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: u32,
}
