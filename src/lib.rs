//! Client-side access layer for a storefront REST backend
//!
//! Every call goes through one [`RequestOrchestrator`](client::RequestOrchestrator),
//! which serves fresh cached responses, coalesces identical in-flight calls
//! and tracks per-endpoint latency. [`StorefrontClient`](client::StorefrontClient)
//! layers typed product, category, cart, wishlist, order, content page and
//! chat operations on top.
//!
//! ```ignore
//! let config = Config::load_or_default(&Config::default_path()?)?;
//! let client = StorefrontClient::from_config(&config)?;
//! let product = client.get_product_by_id("44").await?;
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod error;

pub use client::{StorefrontApi, StorefrontClient};
pub use config::Config;
pub use error::{ApiError, Error, Result};
