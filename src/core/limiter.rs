use dashmap::DashMap;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Per-client sliding window rate limiter
///
/// Admits at most `max_requests` requests per client key in any trailing
/// interval of length `window`. Each key owns its own timestamp queue; the
/// map entry guard serializes admission checks for one key without
/// blocking other keys.
///
/// The limiter is process-local and only does bookkeeping. Callers must
/// finish `admit` before starting any upstream call.
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    max_requests: usize,
    window: Duration,
    clients: DashMap<String, VecDeque<Instant>>,
}

impl SlidingWindowLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clients: DashMap::new(),
        }
    }

    /// Decide whether a request from `client_key` arriving at `now` is admitted
    ///
    /// Rejected requests are not recorded, so a client hammering the endpoint
    /// regains access once its oldest admitted request leaves the window.
    pub fn admit(&self, client_key: &str, now: Instant) -> bool {
        // A zero budget must not create a window for the key
        if self.max_requests == 0 {
            return false;
        }

        let mut timestamps = self.clients.entry(client_key.to_string()).or_default();

        trim(&mut timestamps, now, self.window);

        if timestamps.len() >= self.max_requests {
            tracing::debug!(
                "Rate limit exceeded for {} ({} requests in {:?})",
                client_key,
                timestamps.len(),
                self.window
            );
            return false;
        }

        timestamps.push_back(now);
        true
    }

    /// Drop clients whose window is empty at `now`, returning how many were removed
    pub fn purge_idle(&self, now: Instant) -> usize {
        let window = self.window;
        let mut removed = 0;

        self.clients.retain(|_, timestamps| {
            trim(timestamps, now, window);
            let keep = !timestamps.is_empty();
            if !keep {
                removed += 1;
            }
            keep
        });

        removed
    }

    /// Number of client keys currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }
}

/// Remove timestamps strictly older than `now - window`
#[inline]
fn trim(timestamps: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    // Before the monotonic clock has run for `window`, nothing can be stale.
    let Some(cutoff) = now.checked_sub(window) else {
        return;
    };

    while timestamps.front().is_some_and(|&t| t < cutoff) {
        timestamps.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_admits_up_to_limit() {
        let limiter = SlidingWindowLimiter::new(3, secs(60));
        let t0 = Instant::now();

        assert!(limiter.admit("10.0.0.1", t0));
        assert!(limiter.admit("10.0.0.1", t0 + secs(1)));
        assert!(limiter.admit("10.0.0.1", t0 + secs(2)));
        assert!(!limiter.admit("10.0.0.1", t0 + secs(3)));
    }

    #[test]
    fn test_sliding_window_reopens() {
        let limiter = SlidingWindowLimiter::new(2, secs(60));
        let t0 = Instant::now();

        assert!(limiter.admit("client", t0));
        assert!(limiter.admit("client", t0 + secs(10)));
        assert!(!limiter.admit("client", t0 + secs(20)));
        assert!(limiter.admit("client", t0 + secs(61)));
        // t=10 is still inside the window
        assert!(!limiter.admit("client", t0 + secs(62)));
    }

    #[test]
    fn test_rejection_is_not_recorded() {
        let limiter = SlidingWindowLimiter::new(1, secs(60));
        let t0 = Instant::now();

        assert!(limiter.admit("client", t0));
        for i in 1..50 {
            assert!(!limiter.admit("client", t0 + secs(i)));
        }
        // Only the t=0 admission counts, so t=61 is admitted
        assert!(limiter.admit("client", t0 + secs(61)));
    }

    #[test]
    fn test_boundary_timestamp_is_kept() {
        let limiter = SlidingWindowLimiter::new(1, secs(60));
        let t0 = Instant::now();

        assert!(limiter.admit("client", t0));
        assert!(!limiter.admit("client", t0 + secs(60)));
        assert!(limiter.admit("client", t0 + secs(60) + Duration::from_millis(1)));
    }

    #[test]
    fn test_keys_are_isolated() {
        let limiter = SlidingWindowLimiter::new(2, secs(60));
        let t0 = Instant::now();

        assert!(limiter.admit("A", t0));
        assert!(limiter.admit("A", t0));
        assert!(!limiter.admit("A", t0));
        assert!(limiter.admit("B", t0));
    }

    #[test]
    fn test_zero_limit_rejects_everything() {
        let limiter = SlidingWindowLimiter::new(0, secs(60));
        assert!(!limiter.admit("client", Instant::now()));
        assert!(!limiter.admit("other", Instant::now()));
        assert_eq!(limiter.tracked_clients(), 0);
    }

    #[test]
    fn test_purge_idle_evicts_empty_windows() {
        let limiter = SlidingWindowLimiter::new(5, secs(60));
        let t0 = Instant::now();

        limiter.admit("old", t0);
        limiter.admit("recent", t0 + secs(50));
        assert_eq!(limiter.tracked_clients(), 2);

        let removed = limiter.purge_idle(t0 + secs(90));
        assert_eq!(removed, 1);
        assert_eq!(limiter.tracked_clients(), 1);

        // Evicted client starts from a fresh window
        assert!(limiter.admit("old", t0 + secs(91)));
    }
}
