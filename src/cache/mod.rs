//! Response caching and request coalescing
//!
//! Provides the in-memory cache store, the in-flight request registry and
//! the TTL policy applied to successful GET responses.

pub mod inflight;
pub mod key;
pub mod store;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default cache TTLs per resource category
pub struct CacheTtl;

impl CacheTtl {
    // Catalog data changes only through admin edits
    pub const PRODUCTS: Duration = Duration::from_secs(10 * 60); // 10 min
    pub const CATEGORIES: Duration = Duration::from_secs(30 * 60); // 30 min

    // Order history changes with every checkout
    pub const ORDERS: Duration = Duration::from_secs(60); // 1 min

    pub const DEFAULT: Duration = Duration::from_secs(5 * 60); // 5 min
}

/// Resource category a request path belongs to, for TTL purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceCategory {
    /// /products, /products/{id}, /products?category=...
    Product,
    /// /categories, /categories/{id}
    Category,
    /// /orders, /orders/my-orders, /orders/{id}
    Order,
    /// Everything else that gets cached
    Other,
}

impl ResourceCategory {
    /// Categorize a request by its path.
    ///
    /// The path should be relative to the API base URL (e.g. "/products/44").
    pub fn from_path(path: &str) -> Self {
        let path = key::endpoint_of(path);
        let first = path
            .trim_start_matches('/')
            .split('/')
            .next()
            .unwrap_or_default();

        match first {
            "products" => ResourceCategory::Product,
            "categories" => ResourceCategory::Category,
            "orders" => ResourceCategory::Order,
            _ => ResourceCategory::Other,
        }
    }
}

/// TTL applied to a successful response, per resource category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TtlPolicy {
    #[serde(with = "secs")]
    pub products: Duration,
    #[serde(with = "secs")]
    pub categories: Duration,
    #[serde(with = "secs")]
    pub orders: Duration,
    #[serde(with = "secs", rename = "default")]
    pub fallback: Duration,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            products: CacheTtl::PRODUCTS,
            categories: CacheTtl::CATEGORIES,
            orders: CacheTtl::ORDERS,
            fallback: CacheTtl::DEFAULT,
        }
    }
}

impl TtlPolicy {
    /// TTL for a successful response from `path`.
    pub fn classify(&self, path: &str) -> Duration {
        match ResourceCategory::from_path(path) {
            ResourceCategory::Product => self.products,
            ResourceCategory::Category => self.categories,
            ResourceCategory::Order => self.orders,
            ResourceCategory::Other => self.fallback,
        }
    }
}

mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

// Re-export main types
pub use inflight::{Admission, InflightRegistry, PendingGuard, SharedResponse};
pub use key::fingerprint;
pub use store::{CacheEntry, CacheEntrySnapshot, CacheStats, CacheStore};
