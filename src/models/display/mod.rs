//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod cart;
mod common;
mod content;
mod diagnostics;
mod order;
mod product;

pub use cart::{CartItemDisplay, WishlistDisplay};
pub use common::format_money;
pub use content::{ChatDisplay, PageDisplay};
pub use diagnostics::{CacheEntryDisplay, LatencyDisplay};
pub use order::OrderDisplay;
pub use product::{CategoryDisplay, ProductDisplay};
