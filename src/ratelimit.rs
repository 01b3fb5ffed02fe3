use crate::clock::Clock;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Sliding-window request counter, one independent window per service.
/// Timestamps older than the window are pruned lazily on `check`, never on
/// `record`.
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Vec<DateTime<Utc>>>>,
    limit: usize,
    window: Duration,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            limit,
            window,
            clock,
        }
    }

    /// Prune the service's window, then report whether another request fits.
    pub fn check(&self, service: &str) -> bool {
        let cutoff = self.clock.now() - self.window;
        let mut windows = self.windows.lock().unwrap();
        let timestamps = windows.entry(service.to_string()).or_default();
        timestamps.retain(|t| *t > cutoff);
        timestamps.len() < self.limit
    }

    /// Record one consumed request at the current time.
    pub fn record(&self, service: &str) {
        let now = self.clock.now();
        let mut windows = self.windows.lock().unwrap();
        windows.entry(service.to_string()).or_default().push(now);
    }
}
