//! Test fixtures and builders for API model types
//!
//! Provides builder patterns for creating test data with sensible defaults.
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)]

use super::models::{Category, Order, OrderItem, Product};

// ============================================================================
// ProductBuilder
// ============================================================================

/// Builder for creating test Product instances.
///
/// # Example
/// ```ignore
/// let product = ProductBuilder::new("44")
///     .name("Desk Lamp")
///     .price(19.9)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ProductBuilder {
    product: Product,
}

impl ProductBuilder {
    /// Create a new builder with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            product: Product {
                name: format!("Product {}", &id),
                id,
                description: None,
                price: 10.0,
                original_price: None,
                category: None,
                images: Vec::new(),
                stock: Some(5),
                rating: None,
                is_featured: false,
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.product.name = name.into();
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.product.price = price;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.product.category = Some(category.into());
        self
    }

    pub fn featured(mut self) -> Self {
        self.product.is_featured = true;
        self
    }

    pub fn build(self) -> Product {
        self.product
    }
}

// ============================================================================
// CategoryBuilder
// ============================================================================

/// Builder for creating test Category instances.
#[derive(Debug, Clone)]
pub struct CategoryBuilder {
    category: Category,
}

impl CategoryBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            category: Category {
                name: format!("Category {}", &id),
                slug: Some(format!("category-{}", &id)),
                id,
                description: None,
                image: None,
                product_count: None,
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.category.name = name.into();
        self
    }

    pub fn product_count(mut self, count: u32) -> Self {
        self.category.product_count = Some(count);
        self
    }

    pub fn build(self) -> Category {
        self.category
    }
}

// ============================================================================
// OrderBuilder
// ============================================================================

/// Builder for creating test Order instances. The total follows the items.
#[derive(Debug, Clone)]
pub struct OrderBuilder {
    id: String,
    status: String,
    items: Vec<OrderItem>,
}

impl OrderBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: "pending".to_string(),
            items: Vec::new(),
        }
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Add a line for `product` with the given quantity.
    pub fn item(mut self, product: &Product, quantity: u32) -> Self {
        self.items.push(OrderItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity,
        });
        self
    }

    pub fn build(self) -> Order {
        let total = self
            .items
            .iter()
            .map(|i| i.price * f64::from(i.quantity))
            .sum();
        Order {
            id: self.id,
            order_number: None,
            status: self.status,
            total,
            items: self.items,
            shipping_address: None,
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_total_follows_items() {
        let lamp = ProductBuilder::new("44").price(12.5).build();
        let order = OrderBuilder::new("o1").item(&lamp, 2).status("paid").build();

        assert_eq!(order.items.len(), 1);
        assert!((order.total - 25.0).abs() < f64::EPSILON);
        assert_eq!(order.status, "paid");
    }

    #[test]
    fn test_category_defaults() {
        let category = CategoryBuilder::new("3").product_count(7).build();
        assert_eq!(category.slug.as_deref(), Some("category-3"));
        assert_eq!(category.product_count, Some(7));
    }
}
