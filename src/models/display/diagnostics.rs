//! Latency and cache diagnostics display models

use serde::Serialize;
use tabled::Tabled;

use storefront::cache::CacheEntrySnapshot;
use storefront::client::LatencyStats;

/// Per-endpoint latency row.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct LatencyDisplay {
    #[tabled(rename = "ENDPOINT")]
    pub endpoint: String,

    #[tabled(rename = "AVG MS")]
    pub average_ms: String,

    #[tabled(rename = "SAMPLES")]
    pub samples: usize,

    #[tabled(rename = "SLOW")]
    pub slow: String,
}

impl From<(String, LatencyStats)> for LatencyDisplay {
    fn from((endpoint, stats): (String, LatencyStats)) -> Self {
        Self {
            endpoint,
            average_ms: format!("{:.1}", stats.average_ms),
            samples: stats.count,
            slow: if stats.slow { "\u{26a0}" } else { "" }.to_string(),
        }
    }
}

/// Per-key cache row.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CacheEntryDisplay {
    #[tabled(rename = "KEY")]
    pub key: String,

    #[tabled(rename = "AGE MS")]
    pub age_ms: u64,

    #[tabled(rename = "TTL MS")]
    pub ttl_ms: u64,

    #[tabled(rename = "EXPIRED")]
    pub expired: bool,
}

impl From<CacheEntrySnapshot> for CacheEntryDisplay {
    fn from(entry: CacheEntrySnapshot) -> Self {
        Self {
            key: entry.key,
            age_ms: entry.age_ms,
            ttl_ms: entry.ttl_ms,
            expired: entry.expired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_display() {
        let display = LatencyDisplay::from((
            "/products".to_string(),
            LatencyStats {
                average_ms: 1250.04,
                count: 3,
                slow: true,
            },
        ));
        assert_eq!(display.average_ms, "1250.0");
        assert_eq!(display.samples, 3);
        assert!(!display.slow.is_empty());
    }
}
