//! Storefront API client
//!
//! Layers, bottom-up: [`transport`] performs one HTTP exchange,
//! [`orchestrator`] adds caching, coalescing and latency tracking, and
//! [`StorefrontClient`] exposes the typed per-resource operations from
//! [`api`].

pub mod api;
pub mod auth;
pub mod envelope;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod latency;
#[cfg(test)]
pub(crate) mod mock;
pub mod models;
pub mod orchestrator;
pub mod pagination;
pub mod parallel;
pub mod request;
pub mod storefront;
pub mod transport;

pub use api::{
    CartApi, CategoryApi, ChatApi, ContentPageApi, OrderApi, ProductApi, ProductQuery,
    StorefrontApi, WishlistApi,
};
pub use auth::AuthContext;
pub use envelope::{Envelope, Payload};
pub use latency::{LatencyStats, LatencyTracker};
pub use orchestrator::RequestOrchestrator;
pub use pagination::{PagedResponse, Pagination, PaginationParams, SortOrder};
pub use request::ApiRequest;
pub use storefront::StorefrontClient;
pub use transport::{HttpTransport, RawResponse, Transport};
