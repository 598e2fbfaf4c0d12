//! Pagination helpers for API requests
//!
//! Provides types and utilities for handling paginated API responses.

use log::warn;
use serde::{Deserialize, Serialize};

/// Page size used when fetching a whole collection page by page
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Upper bound on the page count trusted from a server response
pub const MAX_PAGES: usize = 1000;

/// Pagination parameters for API requests.
///
/// Use the builder pattern to configure pagination options.
///
/// # Example
/// ```ignore
/// let params = PaginationParams::new()
///     .limit(20)
///     .page(2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationParams {
    /// Number of items per page
    pub limit: Option<usize>,
    /// Page number (1-indexed)
    pub page: Option<usize>,
    /// Sort field name
    pub sort: Option<String>,
    /// Sort order
    pub order: Option<SortOrder>,
}

/// Sort order for paginated requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order (A-Z, 0-9, oldest first)
    Asc,
    /// Descending order (Z-A, 9-0, newest first)
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl PaginationParams {
    /// Create new pagination params with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size (items per page).
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the page number.
    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the sort field.
    pub fn sort(mut self, field: impl Into<String>) -> Self {
        self.sort = Some(field.into());
        self
    }

    /// Set the sort order.
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Convert to query string parameters.
    ///
    /// Only parameters that are set are emitted, so an empty
    /// `PaginationParams` leaves the request (and its cache key) untouched.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }

        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }

        if let Some(ref field) = self.sort {
            params.push(("sort", field.clone()));
        }

        if let Some(order) = self.order {
            params.push(("order", order.as_str().to_string()));
        }

        params
    }

    /// Check if any pagination parameters are set.
    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.page.is_none() && self.sort.is_none() && self.order.is_none()
    }
}

/// Pagination block of a list response envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page number (1-indexed)
    #[serde(default, alias = "currentPage")]
    pub page: Option<usize>,

    /// Items per page
    #[serde(default, alias = "pageSize")]
    pub limit: Option<usize>,

    /// Total number of items across all pages
    #[serde(default, alias = "totalItems", alias = "totalCount")]
    pub total: Option<usize>,

    /// Total number of pages
    #[serde(default, alias = "totalPages")]
    pub pages: Option<usize>,

    /// Whether there are more pages
    #[serde(default, alias = "hasNextPage")]
    pub has_next: Option<bool>,
}

impl Pagination {
    /// Check if there are more pages to fetch.
    pub fn has_next_page(&self) -> bool {
        if let Some(has_next) = self.has_next {
            return has_next;
        }

        if let (Some(current), Some(pages)) = (self.page, self.pages) {
            return current < pages;
        }

        false
    }

    /// Total page count, derived from `total` and `limit` when the
    /// backend does not send it.
    pub fn page_count(&self) -> Option<usize> {
        self.pages.or_else(|| match (self.total, self.limit) {
            (Some(total), Some(limit)) if limit > 0 => Some(total.div_ceil(limit)),
            _ => None,
        })
    }
}

/// One page of results plus its pagination block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    /// The items on this page
    pub items: Vec<T>,

    /// Pagination metadata, if the endpoint sent any
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl<T> PagedResponse<T> {
    /// Create a page without metadata.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            pagination: None,
        }
    }

    /// Check if there are more pages to fetch.
    pub fn has_more_pages(&self) -> bool {
        self.pagination
            .as_ref()
            .map(|p| p.has_next_page())
            .unwrap_or(false)
    }

    /// Page numbers after the current one, for parallel fetching.
    ///
    /// The reported page count is capped at [`MAX_PAGES`].
    pub fn remaining_pages(&self) -> Vec<usize> {
        let Some(p) = self.pagination.as_ref() else {
            return Vec::new();
        };
        let Some(reported) = p.page_count() else {
            return Vec::new();
        };
        if reported > MAX_PAGES {
            warn!(
                "Server reported {} pages, fetching the first {} only",
                reported, MAX_PAGES
            );
        }

        let count = reported.min(MAX_PAGES);
        let current = p.page.unwrap_or(1);
        if current < count {
            (current + 1..=count).collect()
        } else {
            Vec::new()
        }
    }
}
