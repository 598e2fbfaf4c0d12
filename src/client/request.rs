//! Request description handed to the orchestrator

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded::Serializer;

use crate::cache::fingerprint;
use crate::cache::key::identity_tag;
use crate::error::ApiError;

/// One logical API request: method, path, query, body and headers.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base URL, e.g. "/products/44"
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Append several query parameters.
    pub fn query_pairs<K: Into<String>>(mut self, pairs: impl IntoIterator<Item = (K, String)>) -> Self {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v)));
        self
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to encode body: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers<K: Into<String>>(mut self, headers: impl IntoIterator<Item = (K, String)>) -> Self {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v)));
        self
    }

    /// GET and HEAD are the only methods whose responses are cached.
    pub fn is_cacheable(&self) -> bool {
        self.method == Method::GET || self.method == Method::HEAD
    }

    /// Path with the form-encoded query string appended, in insertion order.
    ///
    /// Names and values are encoded the same way the transport puts them on
    /// the wire, so a value containing `&` or `=` stays one parameter.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = Serializer::new(String::new())
            .extend_pairs(&self.query)
            .finish();
        let sep = if self.path.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.path, sep, query)
    }

    /// Cache and in-flight key for this request.
    ///
    /// The caller identity (`Authorization` and `X-Session-Id`) is folded in
    /// as a digest, so responses are never shared between identities.
    pub fn fingerprint(&self) -> String {
        let key = fingerprint(&self.method, &self.path_and_query(), self.body.as_ref());
        match identity_tag(&self.headers) {
            Some(tag) => format!("{} @{}", key, tag),
            None => key,
        }
    }
}
