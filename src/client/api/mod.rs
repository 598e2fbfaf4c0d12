//! API trait definitions split by resource
//!
//! Each trait is a thin typed surface over the request orchestrator:
//! - [`ProductApi`] - Catalog reads and admin product edits
//! - [`CategoryApi`] - Category reads and admin edits
//! - [`CartApi`] - Cart contents and mutations
//! - [`WishlistApi`] - Saved products
//! - [`OrderApi`] - Checkout and order history
//! - [`ContentPageApi`] - CMS pages
//! - [`ChatApi`] - Support chat send/poll
//!
//! Reads are cached; mutations never are. Mutations do not invalidate
//! anything on their own: callers use the `invalidate_*` operations.

mod cart;
mod category;
mod chat;
mod order;
mod page;
mod product;
mod wishlist;

pub use cart::CartApi;
pub use category::CategoryApi;
pub use chat::ChatApi;
pub use order::OrderApi;
pub use page::ContentPageApi;
pub use product::{ProductApi, ProductQuery};
pub use wishlist::WishlistApi;

/// The whole storefront API surface.
pub trait StorefrontApi:
    ProductApi + CategoryApi + CartApi + WishlistApi + OrderApi + ContentPageApi + ChatApi
{
}

impl<T> StorefrontApi for T where
    T: ProductApi + CategoryApi + CartApi + WishlistApi + OrderApi + ContentPageApi + ChatApi
{
}
