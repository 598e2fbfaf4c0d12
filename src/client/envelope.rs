//! Response envelope shared by every backend endpoint
//!
//! ```json
//! { "success": true, "message": "OK", "data": { ... }, "pagination": { ... } }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::pagination::Pagination;
use crate::error::ApiError;

/// Backend response envelope, parameterized by the `data` type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,

    #[serde(default)]
    pub message: String,

    pub data: T,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// The part of a successful envelope that is cached and handed to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub data: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl From<Value> for Payload {
    fn from(data: Value) -> Self {
        Self {
            data,
            pagination: None,
        }
    }
}

impl Payload {
    /// Decode `data` into the endpoint's typed model.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        T::deserialize(&self.data)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to decode data: {}", e)))
    }
}

/// Raw envelope as it arrives off the wire, before `success` is checked
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    success: Option<bool>,

    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    data: Value,

    #[serde(default)]
    pagination: Option<Pagination>,
}

/// Parse a 2xx response body into a payload.
///
/// `success: false` becomes [`ApiError::Application`] carrying the message.
/// An empty body (204) is a success with `null` data.
pub fn parse_body(body: &str) -> Result<Payload, ApiError> {
    if body.trim().is_empty() {
        return Ok(Payload::from(Value::Null));
    }

    let envelope: RawEnvelope = serde_json::from_str(body).map_err(|e| {
        ApiError::InvalidResponse(format!("Failed to parse response envelope: {}", e))
    })?;

    match envelope.success {
        Some(true) => Ok(Payload {
            data: envelope.data,
            pagination: envelope.pagination,
        }),
        Some(false) => Err(ApiError::Application(
            envelope
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Request was not successful".to_string()),
        )),
        None => Err(ApiError::InvalidResponse(
            "Response envelope has no 'success' field".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_success() {
        let payload = parse_body(r#"{"success":true,"message":"ok","data":{"id":"44"}}"#).unwrap();
        assert_eq!(payload.data, json!({"id": "44"}));
        assert!(payload.pagination.is_none());
    }

    #[test]
    fn test_parse_application_failure() {
        let err = parse_body(r#"{"success":false,"message":"X","data":null}"#).unwrap_err();
        assert_eq!(err, ApiError::Application("X".to_string()));
    }

    #[test]
    fn test_parse_failure_without_message() {
        let err = parse_body(r#"{"success":false}"#).unwrap_err();
        assert!(matches!(err, ApiError::Application(m) if !m.is_empty()));
    }

    #[test]
    fn test_parse_with_pagination() {
        let payload = parse_body(
            r#"{"success":true,"data":[1,2],"pagination":{"page":1,"limit":2,"total":6,"pages":3}}"#,
        )
        .unwrap();
        let pagination = payload.pagination.unwrap();
        assert_eq!(pagination.pages, Some(3));
        assert_eq!(pagination.total, Some(6));
    }

    #[test]
    fn test_parse_empty_body() {
        let payload = parse_body("").unwrap();
        assert_eq!(payload.data, Value::Null);
    }

    #[test]
    fn test_parse_not_an_envelope() {
        assert!(matches!(
            parse_body("<html>oops</html>"),
            Err(ApiError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_body(r#"{"data":[]}"#),
            Err(ApiError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_payload_decode() {
        #[derive(Deserialize)]
        struct Item {
            id: String,
        }

        let payload = Payload::from(json!([{"id": "a"}, {"id": "b"}]));
        let items: Vec<Item> = payload.decode().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, "b");

        let err = payload.decode::<String>().unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[test]
    fn test_typed_envelope() {
        let envelope: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{"success":true,"message":"","data":[1,2,3]}"#).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data, vec![1, 2, 3]);
    }
}
