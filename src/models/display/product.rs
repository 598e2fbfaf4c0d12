//! Product and category display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{format_money, format_optional, truncate_string};
use storefront::client::models::{Category, Product};

/// Product display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ProductDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "PRICE")]
    pub price: String,

    /// Discount off the original price, e.g. "-15%"
    #[tabled(rename = "SALE")]
    pub sale: String,

    #[tabled(rename = "STOCK")]
    pub stock: String,

    #[tabled(rename = "CATEGORY")]
    pub category: String,
}

impl From<&Product> for ProductDisplay {
    fn from(product: &Product) -> Self {
        let stock = match product.stock {
            Some(0) => "out".to_string(),
            other => format_optional(other),
        };

        Self {
            id: product.id.clone(),
            name: truncate_string(&product.name, 40),
            price: format_money(product.price),
            sale: product
                .discount_percent()
                .map(|p| format!("-{}%", p))
                .unwrap_or_default(),
            stock,
            category: product.category.clone().unwrap_or_default(),
        }
    }
}

impl From<Product> for ProductDisplay {
    fn from(product: Product) -> Self {
        Self::from(&product)
    }
}

/// Category display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CategoryDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "SLUG")]
    pub slug: String,

    #[tabled(rename = "PRODUCTS")]
    pub products: String,
}

impl From<Category> for CategoryDisplay {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug.unwrap_or_default(),
            products: format_optional(category.product_count),
        }
    }
}
