use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;

/// Backing storage for request timestamps (epoch milliseconds), keyed by client.
///
/// The limiter reads with [`recent`](RateLimitStore::recent) and then writes with
/// [`record`](RateLimitStore::record). The pair is not atomic: two concurrent requests from
/// the same client can both see a free slot and both be admitted.
pub trait RateLimitStore: Send + Sync {
    /// Timestamps for `client_id` that are still inside the window ending at `now_ms`.
    fn recent(&self, client_id: &str, now_ms: i64, window_ms: i64) -> Vec<i64>;

    /// Replace the timestamps held for `client_id`.
    fn record(&self, client_id: &str, timestamps: Vec<i64>);

    /// Drop expired timestamps for every client and forget clients left with none.
    fn sweep(&self, now_ms: i64, window_ms: i64);

    /// Number of clients currently tracked.
    fn tracked_clients(&self) -> usize;
}

/// Process-local store. Lost on restart and not shared between instances.
#[derive(Default)]
pub struct InMemoryStore {
    entries: DashMap<String, Vec<i64>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl RateLimitStore for InMemoryStore {
    fn recent(&self, client_id: &str, now_ms: i64, window_ms: i64) -> Vec<i64> {
        self.entries
            .get(client_id)
            .map(|entry| {
                entry
                    .iter()
                    .copied()
                    .filter(|t| now_ms - t < window_ms)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn record(&self, client_id: &str, timestamps: Vec<i64>) {
        self.entries.insert(client_id.to_string(), timestamps);
    }

    fn sweep(&self, now_ms: i64, window_ms: i64) {
        self.entries.retain(|_, timestamps| {
            timestamps.retain(|t| now_ms - t < window_ms);
            !timestamps.is_empty()
        });
    }

    fn tracked_clients(&self) -> usize {
        self.entries.len()
    }
}

/// Per-client submission limiter using a sliding window.
pub struct SubmissionRateLimiter {
    store: Arc<dyn RateLimitStore>,
    limit: usize,
    window: Duration,
}

impl SubmissionRateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>, limit: usize, window: Duration) -> Self {
        Self {
            store,
            limit,
            window,
        }
    }

    pub fn in_memory(limit: usize, window: Duration) -> Self {
        Self::new(Arc::new(InMemoryStore::new()), limit, window)
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn store(&self) -> &Arc<dyn RateLimitStore> {
        &self.store
    }

    /// Returns true if the client is over quota. Admitted requests are recorded.
    pub fn is_rate_limited(&self, client_id: &str) -> bool {
        self.is_rate_limited_at(client_id, Utc::now().timestamp_millis())
    }

    pub fn is_rate_limited_at(&self, client_id: &str, now_ms: i64) -> bool {
        let window_ms = self.window_ms();

        self.store.sweep(now_ms, window_ms);

        let mut timestamps = self.store.recent(client_id, now_ms, window_ms);
        if timestamps.len() >= self.limit {
            return true;
        }

        timestamps.push(now_ms);
        self.store.record(client_id, timestamps);
        false
    }

    /// Release clients whose window has fully elapsed.
    pub fn cleanup(&self) {
        self.store.sweep(Utc::now().timestamp_millis(), self.window_ms());
    }

    fn window_ms(&self) -> i64 {
        i64::try_from(self.window.as_millis()).unwrap_or(i64::MAX)
    }
}
