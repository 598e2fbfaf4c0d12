//! Storefront API client implementation

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use super::api::{
    CartApi, CategoryApi, ChatApi, ContentPageApi, OrderApi, ProductApi, ProductQuery, WishlistApi,
};
use super::auth::AuthContext;
use super::envelope::Payload;
use super::latency::{LatencyStats, LatencyTracker};
use super::models::{
    AddToCartRequest, AddToWishlistRequest, Cart, Category, CategoryInput, ChatMessage,
    ContentPage, ContentPageInput, CreateOrderRequest, Order, Product, ProductInput,
    SendChatRequest, UpdateCartItemRequest, WishlistItem,
};
use super::orchestrator::RequestOrchestrator;
use super::pagination::{DEFAULT_PAGE_SIZE, PagedResponse};
use super::parallel::fetch_remaining_pages;
use super::request::ApiRequest;
use super::transport::HttpTransport;
use crate::cache::CacheEntrySnapshot;
use crate::config::Config;
use crate::error::{ApiError, Result};

/// Typed endpoint wrappers over one shared [`RequestOrchestrator`]
pub struct StorefrontClient {
    orchestrator: Arc<RequestOrchestrator>,
    auth: RwLock<AuthContext>,
    use_cache: bool,
}

impl StorefrontClient {
    pub fn new(orchestrator: Arc<RequestOrchestrator>, auth: AuthContext) -> Self {
        Self {
            orchestrator,
            auth: RwLock::new(auth),
            use_cache: true,
        }
    }

    /// Build the HTTP transport, TTL policy and latency tracker from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(config.api_base_url.clone(), config.timeout())?;
        let orchestrator = RequestOrchestrator::new(Arc::new(transport))
            .with_ttl_policy(config.cache_ttl)
            .with_latency_tracker(LatencyTracker::new(config.slow_threshold()));

        Ok(Self::new(Arc::new(orchestrator), config.auth_context()))
    }

    /// Turn cache reads and writes on or off for every wrapper.
    ///
    /// Coalescing of identical in-flight calls still applies.
    pub fn with_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    pub fn orchestrator(&self) -> &Arc<RequestOrchestrator> {
        &self.orchestrator
    }

    pub async fn auth(&self) -> AuthContext {
        self.auth.read().await.clone()
    }

    /// Replace the caller identity.
    ///
    /// Cache keys carry a digest of the identity headers, so requests made
    /// afterwards never join or read the previous identity's responses.
    /// Its cached entries are dropped as well, since nothing can reach them.
    pub async fn set_auth(&self, auth: AuthContext) {
        *self.auth.write().await = auth;
        let removed = self.orchestrator.clear_all();
        debug!("Auth changed, dropped {} cache entries", removed);
    }

    pub fn latency_snapshot(&self) -> BTreeMap<String, LatencyStats> {
        self.orchestrator.latency_snapshot()
    }

    pub fn cache_snapshot(&self) -> Vec<CacheEntrySnapshot> {
        self.orchestrator.cache_snapshot()
    }

    pub fn clear_all(&self) -> usize {
        self.orchestrator.clear_all()
    }

    /// Attach the caller's headers.
    async fn prepare(&self, request: ApiRequest) -> ApiRequest {
        let auth = self.auth.read().await;
        request.headers(auth.headers())
    }

    /// Issue an arbitrary request with the caller's headers.
    ///
    /// GETs go through the cache unless caching is turned off.
    pub async fn fetch(&self, request: ApiRequest) -> Result<Payload> {
        let request = self.prepare(request).await;
        Ok(self.orchestrator.execute(request, self.use_cache).await?)
    }

    /// Cached read.
    async fn read<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let request = self.prepare(request).await;
        Ok(self.orchestrator.call(request, self.use_cache).await?)
    }

    async fn read_paged<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<PagedResponse<T>> {
        let request = self.prepare(request).await;
        Ok(self.orchestrator.call_paged(request, self.use_cache).await?)
    }

    /// Uncached call: mutations and polling.
    async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let request = self.prepare(request).await;
        Ok(self.orchestrator.call(request, false).await?)
    }

    /// Uncached call whose `data` is not needed.
    async fn send_discarding(&self, request: ApiRequest) -> Result<()> {
        let request = self.prepare(request).await;
        self.orchestrator.execute(request, false).await?;
        Ok(())
    }

    fn invalidate(&self, resource: &str) -> usize {
        self.orchestrator.clear_by_resource_prefix(resource)
    }

    /// Fetch every product matching `query`.
    ///
    /// The first page is fetched alone; the remaining pages are then fetched
    /// with at most `max_concurrent` requests in flight.
    pub async fn list_all_products(
        self: &Arc<Self>,
        query: &ProductQuery,
        max_concurrent: usize,
    ) -> Result<Vec<Product>> {
        let mut pagination = query.pagination.clone();
        pagination.limit.get_or_insert(DEFAULT_PAGE_SIZE);
        pagination.page = Some(1);
        let base = query.clone().pagination(pagination);

        let first = self.list_products_paged(&base).await?;
        let remaining = first.remaining_pages();
        let mut products = first.items;

        if !remaining.is_empty() {
            let client = Arc::clone(self);
            let rest = fetch_remaining_pages(
                remaining,
                move |page| {
                    let client = client.clone();
                    let query = base.clone().pagination(base.pagination.clone().page(page));
                    async move { client.list_products(&query).await }
                },
                max_concurrent,
            )
            .await?;
            products.extend(rest);
        }

        Ok(products)
    }
}

/// True when `err` is a 404 (or a wrapper-level not found).
fn is_not_found(err: &crate::error::Error) -> bool {
    err.as_api().is_some_and(ApiError::is_not_found)
}

#[async_trait]
impl ProductApi for StorefrontClient {
    async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>> {
        self.read(ApiRequest::get("/products").query_pairs(query.to_query_params()))
            .await
    }

    async fn list_products_paged(&self, query: &ProductQuery) -> Result<PagedResponse<Product>> {
        self.read_paged(ApiRequest::get("/products").query_pairs(query.to_query_params()))
            .await
    }

    async fn get_product_by_id(&self, id: &str) -> Result<Product> {
        match self.read(ApiRequest::get(format!("/products/{}", id))).await {
            Err(err) if is_not_found(&err) => {
                debug!("Product {} not found by id, searching collection", id);
                let products: Vec<Product> = self.read(ApiRequest::get("/products")).await?;
                products
                    .into_iter()
                    .find(|p| p.id == id)
                    .ok_or_else(|| ApiError::NotFound(format!("product {}", id)).into())
            }
            other => other,
        }
    }

    async fn featured_products(&self) -> Result<Vec<Product>> {
        self.read(ApiRequest::get("/products/featured")).await
    }

    async fn create_product(&self, input: &ProductInput) -> Result<Product> {
        self.send(ApiRequest::post("/products").json(input)?).await
    }

    async fn update_product(&self, id: &str, input: &ProductInput) -> Result<Product> {
        self.send(ApiRequest::put(format!("/products/{}", id)).json(input)?)
            .await
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        self.send_discarding(ApiRequest::delete(format!("/products/{}", id)))
            .await
    }

    fn invalidate_products(&self) -> usize {
        self.invalidate("products")
    }
}

#[async_trait]
impl CategoryApi for StorefrontClient {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.read(ApiRequest::get("/categories")).await
    }

    async fn get_category(&self, id: &str) -> Result<Category> {
        self.read(ApiRequest::get(format!("/categories/{}", id))).await
    }

    async fn create_category(&self, input: &CategoryInput) -> Result<Category> {
        self.send(ApiRequest::post("/categories").json(input)?).await
    }

    async fn update_category(&self, id: &str, input: &CategoryInput) -> Result<Category> {
        self.send(ApiRequest::put(format!("/categories/{}", id)).json(input)?)
            .await
    }

    async fn delete_category(&self, id: &str) -> Result<()> {
        self.send_discarding(ApiRequest::delete(format!("/categories/{}", id)))
            .await
    }

    fn invalidate_categories(&self) -> usize {
        self.invalidate("categories")
    }
}

#[async_trait]
impl CartApi for StorefrontClient {
    async fn get_cart(&self) -> Result<Cart> {
        self.read(ApiRequest::get("/cart")).await
    }

    async fn add_to_cart(&self, product_id: &str, quantity: u32) -> Result<Cart> {
        let body = AddToCartRequest {
            product_id: product_id.to_string(),
            quantity,
        };
        self.send(ApiRequest::post("/cart/add").json(&body)?).await
    }

    async fn update_cart_item(&self, item_id: &str, quantity: u32) -> Result<Cart> {
        let body = UpdateCartItemRequest { quantity };
        self.send(ApiRequest::put(format!("/cart/items/{}", item_id)).json(&body)?)
            .await
    }

    async fn remove_cart_item(&self, item_id: &str) -> Result<Cart> {
        self.send(ApiRequest::delete(format!("/cart/items/{}", item_id)))
            .await
    }

    async fn clear_cart(&self) -> Result<()> {
        self.send_discarding(ApiRequest::delete("/cart/clear")).await
    }

    fn invalidate_cart(&self) -> usize {
        self.invalidate("cart")
    }
}

#[async_trait]
impl WishlistApi for StorefrontClient {
    async fn get_wishlist(&self) -> Result<Vec<WishlistItem>> {
        self.read(ApiRequest::get("/wishlist")).await
    }

    async fn add_to_wishlist(&self, product_id: &str) -> Result<Vec<WishlistItem>> {
        let body = AddToWishlistRequest {
            product_id: product_id.to_string(),
        };
        self.send(ApiRequest::post("/wishlist/add").json(&body)?).await
    }

    async fn remove_from_wishlist(&self, product_id: &str) -> Result<Vec<WishlistItem>> {
        self.send(ApiRequest::delete(format!("/wishlist/{}", product_id)))
            .await
    }

    fn invalidate_wishlist(&self) -> usize {
        self.invalidate("wishlist")
    }
}

#[async_trait]
impl OrderApi for StorefrontClient {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order> {
        self.send(ApiRequest::post("/orders").json(request)?).await
    }

    async fn my_orders(&self) -> Result<Vec<Order>> {
        self.read(ApiRequest::get("/orders/my-orders")).await
    }

    async fn get_order(&self, id: &str) -> Result<Order> {
        self.read(ApiRequest::get(format!("/orders/{}", id))).await
    }

    fn invalidate_orders(&self) -> usize {
        self.invalidate("orders")
    }
}

#[async_trait]
impl ContentPageApi for StorefrontClient {
    async fn list_pages(&self) -> Result<Vec<ContentPage>> {
        self.read(ApiRequest::get("/pages")).await
    }

    async fn get_page_by_slug(&self, slug: &str) -> Result<ContentPage> {
        match self.read(ApiRequest::get(format!("/pages/{}", slug))).await {
            Err(err) if is_not_found(&err) => {
                debug!("Page '{}' not found by slug, searching page list", slug);
                let pages = self.list_pages().await?;
                pages
                    .into_iter()
                    .find(|p| p.slug == slug)
                    .ok_or_else(|| ApiError::NotFound(format!("page '{}'", slug)).into())
            }
            other => other,
        }
    }

    async fn create_page(&self, input: &ContentPageInput) -> Result<ContentPage> {
        self.send(ApiRequest::post("/pages").json(input)?).await
    }

    async fn update_page(&self, id: &str, input: &ContentPageInput) -> Result<ContentPage> {
        self.send(ApiRequest::put(format!("/pages/{}", id)).json(input)?)
            .await
    }

    async fn delete_page(&self, id: &str) -> Result<()> {
        self.send_discarding(ApiRequest::delete(format!("/pages/{}", id)))
            .await
    }

    fn invalidate_pages(&self) -> usize {
        self.invalidate("pages")
    }
}

#[async_trait]
impl ChatApi for StorefrontClient {
    async fn chat_messages(&self, since: Option<&str>) -> Result<Vec<ChatMessage>> {
        let mut request = ApiRequest::get("/chat/messages");
        if let Some(since) = since {
            request = request.query("since", since);
        }
        self.send(request).await
    }

    async fn send_chat_message(&self, message: &str) -> Result<ChatMessage> {
        let body = SendChatRequest {
            message: message.to_string(),
        };
        self.send(ApiRequest::post("/chat/send").json(&body)?).await
    }
}
