//! Request orchestrator: the single entry point for every API call
//!
//! Derives the request fingerprint, serves fresh cache hits, coalesces
//! identical in-flight calls, performs the transport call, classifies the
//! TTL, writes the cache and records latency.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use log::{debug, warn};
use serde::de::DeserializeOwned;

use super::envelope::{Payload, parse_body};
use super::latency::{LatencyStats, LatencyTracker};
use super::pagination::PagedResponse;
use super::request::ApiRequest;
use super::transport::Transport;
use crate::cache::key::endpoint_of;
use crate::cache::{
    Admission, CacheEntrySnapshot, CacheStore, InflightRegistry, PendingGuard, SharedResponse,
    TtlPolicy,
};
use crate::error::ApiError;

type ApiResult<T> = std::result::Result<T, ApiError>;

/// Caching, coalescing front door to the backend.
///
/// Construct one per application session and share it (behind an `Arc`)
/// with every endpoint wrapper.
pub struct RequestOrchestrator {
    transport: Arc<dyn Transport>,
    cache: Arc<CacheStore>,
    inflight: Arc<InflightRegistry>,
    latency: Arc<LatencyTracker>,
    ttl_policy: TtlPolicy,
}

impl RequestOrchestrator {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            cache: Arc::new(CacheStore::new()),
            inflight: Arc::new(InflightRegistry::new()),
            latency: Arc::new(LatencyTracker::default()),
            ttl_policy: TtlPolicy::default(),
        }
    }

    pub fn with_ttl_policy(mut self, ttl_policy: TtlPolicy) -> Self {
        self.ttl_policy = ttl_policy;
        self
    }

    pub fn with_latency_tracker(mut self, latency: LatencyTracker) -> Self {
        self.latency = Arc::new(latency);
        self
    }

    pub fn ttl_policy(&self) -> &TtlPolicy {
        &self.ttl_policy
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn latency(&self) -> &LatencyTracker {
        &self.latency
    }

    /// Number of requests currently in flight.
    pub fn in_flight(&self) -> usize {
        self.inflight.len()
    }

    /// Issue a request and decode the envelope's `data` into `T`.
    ///
    /// With `use_cache`, a GET is served from a fresh cache entry when one
    /// exists and its successful response is cached. Mutations never touch
    /// the cache whatever `use_cache` says.
    pub async fn call<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        use_cache: bool,
    ) -> ApiResult<T> {
        self.execute(request, use_cache).await?.decode()
    }

    /// Like [`call`](Self::call), keeping the envelope's pagination block.
    pub async fn call_paged<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        use_cache: bool,
    ) -> ApiResult<PagedResponse<T>> {
        let payload = self.execute(request, use_cache).await?;
        Ok(PagedResponse {
            items: payload.decode()?,
            pagination: payload.pagination,
        })
    }

    /// Issue a request and return the raw payload.
    pub async fn execute(&self, request: ApiRequest, use_cache: bool) -> ApiResult<Payload> {
        let key = request.fingerprint();
        let cacheable = use_cache && request.is_cacheable();

        let admission = self.inflight.admit(
            &key,
            || if cacheable { self.cache.get(&key) } else { None },
            |id| self.start(request, key.clone(), id, cacheable),
        );

        match admission {
            Admission::Cached(payload) => {
                debug!("Cache hit: {}", key);
                Ok(payload)
            }
            Admission::Joined(pending) => {
                debug!("Joining in-flight request: {}", key);
                pending.await
            }
            Admission::Started(pending) => {
                debug!("Cache miss: {}", key);
                pending.await
            }
        }
    }

    /// Spawn the network call for `key`.
    ///
    /// The call runs to completion even if every caller stops waiting. The
    /// registration is removed when the task ends, after the cache write, so
    /// a caller arriving later either sees the cached payload or starts a
    /// fresh request.
    fn start(&self, request: ApiRequest, key: String, id: u64, cacheable: bool) -> SharedResponse {
        let transport = self.transport.clone();
        let cache = self.cache.clone();
        let latency = self.latency.clone();
        let ttl = self.ttl_policy.classify(&request.path);
        let guard = PendingGuard::new(self.inflight.clone(), key.clone(), id);

        let task = tokio::spawn(async move {
            let _guard = guard;
            let endpoint = endpoint_of(&request.path).to_string();
            let started = Instant::now();

            let outcome = dispatch(transport.as_ref(), &request).await;

            match outcome {
                Ok(ref payload) => {
                    if cacheable {
                        debug!("Caching {} for {:?}", key, ttl);
                        cache.put(&key, payload.clone(), ttl);
                    }
                    if latency.record(&endpoint, started.elapsed()) {
                        warn!(
                            "Slow endpoint {}: average {:?} over the last {} calls",
                            endpoint,
                            latency.average(&endpoint),
                            latency.count(&endpoint)
                        );
                    }
                }
                Err(ref err) => warn!("{} {} failed: {}", request.method, endpoint, err),
            }

            outcome
        });

        async move {
            task.await
                .unwrap_or_else(|e| Err(ApiError::Network(format!("Request task failed: {}", e))))
        }
        .boxed()
        .shared()
    }

    /// Drop every cached response.
    pub fn clear_all(&self) -> usize {
        let removed = self.cache.clear();
        debug!("Cleared {} cache entries", removed);
        removed
    }

    /// Drop cached responses whose key contains `pattern`, e.g. "products".
    pub fn clear_by_resource_prefix(&self, pattern: &str) -> usize {
        let removed = self.cache.clear_by_prefix(pattern);
        debug!("Invalidated {} cache entries matching '{}'", removed, pattern);
        removed
    }

    pub fn latency_snapshot(&self) -> BTreeMap<String, LatencyStats> {
        self.latency.snapshot()
    }

    pub fn cache_snapshot(&self) -> Vec<CacheEntrySnapshot> {
        self.cache.snapshot()
    }
}

/// One transport round trip, classified into payload or failure.
async fn dispatch(transport: &dyn Transport, request: &ApiRequest) -> ApiResult<Payload> {
    let response = transport.send(request).await?;

    if !response.is_success() {
        return Err(ApiError::Http {
            status: response.status,
            body: response.body,
        });
    }

    parse_body(&response.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockTransport;
    use reqwest::Method;
    use serde_json::{Value, json};
    use std::time::Duration;

    fn orchestrator(mock: &Arc<MockTransport>) -> RequestOrchestrator {
        RequestOrchestrator::new(mock.clone())
    }

    #[tokio::test]
    async fn test_get_is_cached() {
        let mock = Arc::new(MockTransport::new().with_data(
            Method::GET,
            "/products/44",
            json!({"id": "44", "name": "Lamp"}),
        ));
        let orch = orchestrator(&mock);

        let first: Value = orch.call(ApiRequest::get("/products/44"), true).await.unwrap();
        let second: Value = orch.call(ApiRequest::get("/products/44"), true).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(mock.call_count(Method::GET, "/products/44"), 1);
        // Only the network round trip is sampled
        assert_eq!(orch.latency().count("/products/44"), 1);
    }

    #[tokio::test]
    async fn test_use_cache_false_always_fetches() {
        let mock = Arc::new(MockTransport::new().with_data(Method::GET, "/cart", json!({"items": []})));
        let orch = orchestrator(&mock);

        let _: Value = orch.call(ApiRequest::get("/cart"), false).await.unwrap();
        let _: Value = orch.call(ApiRequest::get("/cart"), false).await.unwrap();

        assert_eq!(mock.call_count(Method::GET, "/cart"), 2);
        assert!(orch.cache().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_identical_calls_coalesce() {
        let mock = Arc::new(
            MockTransport::new()
                .with_data(Method::GET, "/products", json!([{"id": "1"}]))
                .with_delay(Method::GET, "/products", Duration::from_millis(50)),
        );
        let orch = orchestrator(&mock);

        let (a, b) = tokio::join!(
            orch.call::<Value>(ApiRequest::get("/products"), true),
            orch.call::<Value>(ApiRequest::get("/products"), true),
        );

        assert_eq!(a.unwrap(), b.unwrap());
        assert_eq!(mock.call_count(Method::GET, "/products"), 1);
        assert_eq!(orch.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_coalescing_without_cache() {
        let mock = Arc::new(
            MockTransport::new()
                .with_data(Method::GET, "/chat/messages", json!([]))
                .with_delay(Method::GET, "/chat/messages", Duration::from_millis(30)),
        );
        let orch = orchestrator(&mock);

        let (a, b) = tokio::join!(
            orch.execute(ApiRequest::get("/chat/messages"), false),
            orch.execute(ApiRequest::get("/chat/messages"), false),
        );

        assert!(a.is_ok() && b.is_ok());
        assert_eq!(mock.call_count(Method::GET, "/chat/messages"), 1);
        assert!(orch.cache().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_failure_shared() {
        let mock = Arc::new(
            MockTransport::new()
                .with_status(Method::GET, "/categories", 503, "down")
                .with_delay(Method::GET, "/categories", Duration::from_millis(30)),
        );
        let orch = orchestrator(&mock);

        let (a, b) = tokio::join!(
            orch.execute(ApiRequest::get("/categories"), true),
            orch.execute(ApiRequest::get("/categories"), true),
        );

        let expected = ApiError::Http {
            status: 503,
            body: "down".to_string(),
        };
        assert_eq!(a.unwrap_err(), expected);
        assert_eq!(b.unwrap_err(), expected);
        assert_eq!(mock.call_count(Method::GET, "/categories"), 1);
    }

    #[tokio::test]
    async fn test_registry_cleared_after_success_and_failure() {
        let mock = Arc::new(
            MockTransport::new()
                .with_data(Method::POST, "/orders", json!({"id": "o1"}))
                .with_status(Method::GET, "/orders/my-orders", 500, "err"),
        );
        let orch = orchestrator(&mock);

        let order = ApiRequest::post("/orders").json(&json!({"items": []})).unwrap();
        orch.execute(order.clone(), false).await.unwrap();
        orch.execute(order, false).await.unwrap();
        assert_eq!(mock.call_count(Method::POST, "/orders"), 2);

        let history = ApiRequest::get("/orders/my-orders");
        assert!(orch.execute(history.clone(), true).await.is_err());
        assert!(orch.execute(history, true).await.is_err());
        assert_eq!(mock.call_count(Method::GET, "/orders/my-orders"), 2);

        assert_eq!(orch.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_transport_error_unregisters() {
        let mock = Arc::new(MockTransport::new().with_error(
            Method::GET,
            "/products",
            ApiError::Network("connection refused".to_string()),
        ));
        let orch = orchestrator(&mock);

        let err = orch
            .execute(ApiRequest::get("/products"), true)
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert_eq!(orch.in_flight(), 0);
        assert!(orch.cache().is_empty());
    }

    #[tokio::test]
    async fn test_transport_panic_unregisters() {
        let mock = Arc::new(MockTransport::new().with_panic(Method::GET, "/pages"));
        let orch = orchestrator(&mock);

        let err = orch.execute(ApiRequest::get("/pages"), true).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(orch.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_post_never_cached_even_with_use_cache() {
        let mock = Arc::new(MockTransport::new().with_data(
            Method::POST,
            "/cart/add",
            json!({"items": [{"id": "i1"}]}),
        ));
        let orch = orchestrator(&mock);

        let req = ApiRequest::post("/cart/add")
            .json(&json!({"productId": "1", "quantity": 1}))
            .unwrap();
        orch.execute(req.clone(), true).await.unwrap();
        orch.execute(req, true).await.unwrap();

        assert_eq!(mock.call_count(Method::POST, "/cart/add"), 2);
        assert!(orch.cache().is_empty());
    }

    #[tokio::test]
    async fn test_ttl_classification_on_write() {
        let mock = Arc::new(
            MockTransport::new()
                .with_data(Method::GET, "/products", json!([]))
                .with_data(Method::GET, "/categories", json!([]))
                .with_data(Method::GET, "/orders/my-orders", json!([]))
                .with_data(Method::GET, "/wishlist", json!([])),
        );
        let orch = orchestrator(&mock);

        for path in ["/products", "/categories", "/orders/my-orders", "/wishlist"] {
            orch.execute(ApiRequest::get(path), true).await.unwrap();
        }

        let ttls: BTreeMap<String, u64> = orch
            .cache_snapshot()
            .into_iter()
            .map(|e| (e.key, e.ttl_ms))
            .collect();
        assert_eq!(ttls["GET /products"], 600_000);
        assert_eq!(ttls["GET /categories"], 1_800_000);
        assert_eq!(ttls["GET /orders/my-orders"], 60_000);
        assert_eq!(ttls["GET /wishlist"], 300_000);
    }

    #[tokio::test]
    async fn test_application_failure_not_cached() {
        let mock = Arc::new(MockTransport::new().with_failure(
            Method::GET,
            "/products/9",
            "X",
        ));
        let orch = orchestrator(&mock);

        let err = orch
            .execute(ApiRequest::get("/products/9"), true)
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Application("X".to_string()));
        assert!(orch.cache().is_empty());
        assert_eq!(orch.latency().count("/products/9"), 0);
    }

    #[tokio::test]
    async fn test_http_500_is_transport_failure() {
        let mock = Arc::new(MockTransport::new().with_status(
            Method::GET,
            "/products",
            500,
            "Internal Server Error",
        ));
        let orch = orchestrator(&mock);

        let err = orch
            .execute(ApiRequest::get("/products"), true)
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.status(), Some(500));
        assert!(orch.cache().is_empty());
    }

    #[tokio::test]
    async fn test_clear_by_resource_prefix() {
        let mock = Arc::new(
            MockTransport::new()
                .with_data(Method::GET, "/products", json!([]))
                .with_data(Method::GET, "/products/44", json!({}))
                .with_data(Method::GET, "/categories", json!([])),
        );
        let orch = orchestrator(&mock);

        for path in ["/products", "/products/44", "/categories"] {
            orch.execute(ApiRequest::get(path), true).await.unwrap();
        }

        assert_eq!(orch.clear_by_resource_prefix("products"), 2);
        assert!(orch.cache().get("GET /products").is_none());
        assert!(orch.cache().get("GET /products/44").is_none());
        assert!(orch.cache().get("GET /categories").is_some());

        // Next read goes back to the network
        orch.execute(ApiRequest::get("/products"), true).await.unwrap();
        assert_eq!(mock.call_count(Method::GET, "/products"), 2);

        assert_eq!(orch.clear_all(), 2);
        assert!(orch.cache().is_empty());
    }

    #[tokio::test]
    async fn test_decode_error_surfaces_as_invalid_response() {
        let mock = Arc::new(MockTransport::new().with_data(
            Method::GET,
            "/products/1",
            json!("not an object"),
        ));
        let orch = orchestrator(&mock);

        #[derive(Debug, serde::Deserialize)]
        struct Product {
            #[allow(dead_code)]
            id: String,
        }

        let err = orch
            .call::<Product>(ApiRequest::get("/products/1"), true)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_call_paged_keeps_pagination() {
        let mock = Arc::new(MockTransport::new().with_envelope(
            Method::GET,
            "/products?page=1",
            json!({
                "success": true,
                "data": [{"n": 1}],
                "pagination": {"page": 1, "pages": 2, "limit": 1, "total": 2}
            }),
        ));
        let orch = orchestrator(&mock);

        let page: PagedResponse<Value> = orch
            .call_paged(ApiRequest::get("/products").query("page", 1), true)
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.remaining_pages(), vec![2]);
    }
}
