//! Product API trait

use async_trait::async_trait;

use crate::client::models::{Product, ProductInput};
use crate::client::pagination::{PagedResponse, PaginationParams};
use crate::error::Result;

/// Filters for the product collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Category ID or slug
    pub category: Option<String>,
    /// Free-text search
    pub search: Option<String>,
    pub pagination: PaginationParams,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn pagination(mut self, pagination: PaginationParams) -> Self {
        self.pagination = pagination;
        self
    }

    /// Query string pairs, filters first, then pagination.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref category) = self.category {
            params.push(("category", category.clone()));
        }
        if let Some(ref search) = self.search {
            params.push(("search", search.clone()));
        }
        params.extend(self.pagination.to_query_params());
        params
    }
}

/// Catalog operations
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// List products matching `query` (one page when paginated).
    async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>>;

    /// List products with the pagination block, for fetching further pages.
    async fn list_products_paged(&self, query: &ProductQuery) -> Result<PagedResponse<Product>>;

    /// Get one product.
    ///
    /// Falls back to searching the full collection when the detail
    /// endpoint answers 404.
    async fn get_product_by_id(&self, id: &str) -> Result<Product>;

    async fn featured_products(&self) -> Result<Vec<Product>>;

    async fn create_product(&self, input: &ProductInput) -> Result<Product>;

    async fn update_product(&self, id: &str, input: &ProductInput) -> Result<Product>;

    async fn delete_product(&self, id: &str) -> Result<()>;

    /// Drop every cached product response. Returns the number removed.
    fn invalidate_products(&self) -> usize;
}
