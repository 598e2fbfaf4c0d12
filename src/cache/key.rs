//! Request fingerprints used as cache and in-flight registry keys

use reqwest::Method;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Hex characters of the body digest kept in a fingerprint
const BODY_DIGEST_LEN: usize = 16;

/// Hex characters of the caller identity digest kept in a fingerprint
const IDENTITY_DIGEST_LEN: usize = 12;

/// Headers that identify the caller. Matched case-insensitively.
const IDENTITY_HEADERS: [&str; 2] = ["authorization", "x-session-id"];

/// Generate a deterministic fingerprint from method, path and body.
///
/// The path keeps its resource segments verbatim so that substring
/// invalidation (`"products"`, `"cart"`) matches every key of a resource.
/// Query parameters are sorted by name, so `?b=2&a=1` and `?a=1&b=2` map to
/// the same key. A request body is folded in as a SHA-256 digest.
pub fn fingerprint(method: &Method, path: &str, body: Option<&Value>) -> String {
    let mut key = format!("{} {}", method.as_str(), canonical_path(path));

    if let Some(body) = body {
        let mut hasher = Sha256::new();
        // serde_json maps are ordered, so equal objects serialize identically
        hasher.update(body.to_string().as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        key.push('#');
        key.push_str(&digest[..BODY_DIGEST_LEN]);
    }

    key
}

/// Digest of the identity headers in `headers`, or `None` for an
/// anonymous request.
pub fn identity_tag(headers: &[(String, String)]) -> Option<String> {
    let mut hasher = Sha256::new();
    let mut found = false;

    for wanted in IDENTITY_HEADERS {
        for (name, value) in headers {
            if name.eq_ignore_ascii_case(wanted) && !value.is_empty() {
                hasher.update(wanted.as_bytes());
                hasher.update(b"\0");
                hasher.update(value.as_bytes());
                hasher.update(b"\0");
                found = true;
            }
        }
    }

    if !found {
        return None;
    }
    let digest = format!("{:x}", hasher.finalize());
    Some(digest[..IDENTITY_DIGEST_LEN].to_string())
}

/// Path without the query string, used to tag latency samples.
pub fn endpoint_of(path: &str) -> &str {
    path.split_once('?').map(|(p, _)| p).unwrap_or(path)
}

fn canonical_path(path: &str) -> String {
    let Some((base, query)) = path.split_once('?') else {
        return path.to_string();
    };

    let mut params: Vec<&str> = query.split('&').filter(|p| !p.is_empty()).collect();
    if params.is_empty() {
        return base.to_string();
    }

    // Stable sort on the name keeps repeated parameters in request order
    params.sort_by_key(|p| p.split_once('=').map(|(k, _)| k).unwrap_or(p));

    format!("{}?{}", base, params.join("&"))
}
