//! Per-endpoint round-trip latency tracking
//!
//! Keeps the last few samples per endpoint in a ring buffer. Used for
//! diagnostics and slow-endpoint warnings only; nothing is persisted.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;

/// Samples kept per endpoint
pub const SAMPLE_CAPACITY: usize = 10;

/// Average above which an endpoint is reported as slow
pub const DEFAULT_SLOW_THRESHOLD: Duration = Duration::from_millis(1000);

/// Summary of one endpoint's recent latency
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencyStats {
    pub average_ms: f64,
    pub count: usize,
    pub slow: bool,
}

/// Bounded history of round-trip durations, keyed by endpoint
#[derive(Debug)]
pub struct LatencyTracker {
    samples: Mutex<HashMap<String, VecDeque<Duration>>>,
    slow_threshold: Duration,
}

impl Default for LatencyTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SLOW_THRESHOLD)
    }
}

impl LatencyTracker {
    pub fn new(slow_threshold: Duration) -> Self {
        Self {
            samples: Mutex::new(HashMap::new()),
            slow_threshold,
        }
    }

    fn samples(&self) -> MutexGuard<'_, HashMap<String, VecDeque<Duration>>> {
        self.samples.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn slow_threshold(&self) -> Duration {
        self.slow_threshold
    }

    /// Append a sample, dropping the oldest one past capacity.
    ///
    /// Returns true when this sample tipped the endpoint into slow.
    pub fn record(&self, endpoint: &str, duration: Duration) -> bool {
        let mut samples = self.samples();
        let buffer = samples.entry(endpoint.to_string()).or_default();

        let was_slow = Self::mean(buffer) > self.slow_threshold;
        buffer.push_back(duration);
        if buffer.len() > SAMPLE_CAPACITY {
            buffer.pop_front();
        }

        !was_slow && Self::mean(buffer) > self.slow_threshold
    }

    /// Mean of the current buffer; zero if nothing was recorded.
    pub fn average(&self, endpoint: &str) -> Duration {
        self.samples()
            .get(endpoint)
            .map(Self::mean)
            .unwrap_or(Duration::ZERO)
    }

    pub fn is_slow(&self, endpoint: &str) -> bool {
        self.average(endpoint) > self.slow_threshold
    }

    /// Number of samples currently held for `endpoint`.
    pub fn count(&self, endpoint: &str) -> usize {
        self.samples().get(endpoint).map(VecDeque::len).unwrap_or(0)
    }

    pub fn snapshot(&self) -> BTreeMap<String, LatencyStats> {
        self.samples()
            .iter()
            .map(|(endpoint, buffer)| {
                let average = Self::mean(buffer);
                (
                    endpoint.clone(),
                    LatencyStats {
                        average_ms: average.as_secs_f64() * 1000.0,
                        count: buffer.len(),
                        slow: average > self.slow_threshold,
                    },
                )
            })
            .collect()
    }

    fn mean(buffer: &VecDeque<Duration>) -> Duration {
        if buffer.is_empty() {
            return Duration::ZERO;
        }
        buffer.iter().sum::<Duration>() / buffer.len() as u32
    }
}
