//! Mock transport for testing
//!
//! Serves canned responses per route so the orchestrator and endpoint
//! wrappers can be exercised without a backend.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Value, json};

use super::request::ApiRequest;
use super::transport::{RawResponse, Transport};
use crate::error::ApiError;

/// Mock transport for testing.
///
/// Routes are keyed by method plus path and query, in the order the
/// request builds them.
///
/// # Example
/// ```ignore
/// let mock = Arc::new(
///     MockTransport::new()
///         .with_data(Method::GET, "/products", json!([]))
///         .with_delay(Method::GET, "/products", Duration::from_millis(50)),
/// );
/// let orchestrator = RequestOrchestrator::new(mock.clone());
/// ```
#[derive(Default)]
pub struct MockTransport {
    routes: HashMap<String, Route>,
    captured: Mutex<Vec<CapturedRequest>>,
}

#[derive(Clone)]
struct Route {
    reply: Reply,
    delay: Option<Duration>,
}

#[derive(Clone)]
enum Reply {
    Response(RawResponse),
    Error(ApiError),
    Panic,
}

impl Default for Route {
    fn default() -> Self {
        Self {
            reply: Reply::Response(not_found()),
            delay: None,
        }
    }
}

/// A request seen by the mock, for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    /// Path and query string
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

fn route_key(method: &Method, path: &str) -> String {
    format!("{} {}", method, path)
}

fn not_found() -> RawResponse {
    RawResponse {
        status: 404,
        body: json!({"success": false, "message": "Not found"}).to_string(),
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn route(mut self, method: Method, path: &str, reply: Reply) -> Self {
        self.routes
            .entry(route_key(&method, path))
            .or_default()
            .reply = reply;
        self
    }

    /// Respond with `{"success": true, "data": data}`.
    pub fn with_data(self, method: Method, path: &str, data: Value) -> Self {
        self.with_envelope(method, path, json!({"success": true, "data": data}))
    }

    /// Respond 200 with an arbitrary envelope.
    pub fn with_envelope(self, method: Method, path: &str, envelope: Value) -> Self {
        self.with_status(method, path, 200, &envelope.to_string())
    }

    /// Respond 200 with `{"success": false, "message": message}`.
    pub fn with_failure(self, method: Method, path: &str, message: &str) -> Self {
        self.with_envelope(method, path, json!({"success": false, "message": message}))
    }

    pub fn with_status(self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.route(
            method,
            path,
            Reply::Response(RawResponse {
                status,
                body: body.to_string(),
            }),
        )
    }

    /// Fail without a response, as a dropped connection would.
    pub fn with_error(self, method: Method, path: &str, error: ApiError) -> Self {
        self.route(method, path, Reply::Error(error))
    }

    pub fn with_panic(self, method: Method, path: &str) -> Self {
        self.route(method, path, Reply::Panic)
    }

    /// Hold the response for `delay` before replying.
    pub fn with_delay(mut self, method: Method, path: &str, delay: Duration) -> Self {
        self.routes
            .entry(route_key(&method, path))
            .or_default()
            .delay = Some(delay);
        self
    }

    /// Number of requests received for one route.
    pub fn call_count(&self, method: Method, path: &str) -> usize {
        self.captured()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.captured().len()
    }

    pub fn captured(&self) -> Vec<CapturedRequest> {
        self.captured
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Most recent request received, if any.
    pub fn last_request(&self) -> Option<CapturedRequest> {
        self.captured().pop()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        let path = request.path_and_query();
        self.captured
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(CapturedRequest {
                method: request.method.clone(),
                path: path.clone(),
                headers: request.headers.clone(),
                body: request.body.clone(),
            });

        let route = self
            .routes
            .get(&route_key(&request.method, &path))
            .cloned()
            .unwrap_or_default();

        if let Some(delay) = route.delay {
            tokio::time::sleep(delay).await;
        }

        match route.reply {
            Reply::Response(response) => Ok(response),
            Reply::Error(error) => Err(error),
            Reply::Panic => panic!("mock transport panicked on {}", path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unmatched_route_is_404() {
        let mock = MockTransport::new();
        let response = mock.send(&ApiRequest::get("/nope")).await.unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(mock.call_count(Method::GET, "/nope"), 1);
    }

    #[tokio::test]
    async fn test_with_data_wraps_envelope() {
        let mock = MockTransport::new().with_data(Method::GET, "/products", json!([1]));
        let response = mock.send(&ApiRequest::get("/products")).await.unwrap();

        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"], json!([1]));
    }

    #[tokio::test]
    async fn test_captures_headers_and_query() {
        let mock = MockTransport::new();
        let request = ApiRequest::get("/chat/messages")
            .query("since", "2024-01-01")
            .header("Authorization", "Bearer t");
        mock.send(&request).await.unwrap();

        let captured = mock.last_request().unwrap();
        assert_eq!(captured.path, "/chat/messages?since=2024-01-01");
        assert_eq!(captured.header("authorization"), Some("Bearer t"));
    }
}
