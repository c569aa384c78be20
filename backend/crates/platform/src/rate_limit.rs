//! Rate Limiting Infrastructure
//!
//! Two in-process limiters:
//! - [`GlobalRateLimiter`]: one token bucket shared by every caller
//! - [`WindowedCounterLimiter`]: a request counter per key that resets once
//!   the key has been quiet for longer than the window

use dashmap::DashMap;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use std::hash::Hash;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

/// Rate limit configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(1),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }

    fn burst(&self) -> NonZeroU32 {
        NonZeroU32::new(self.max_requests).unwrap_or(NonZeroU32::MIN)
    }
}

/// Process-wide token bucket
///
/// Refills `max_requests` tokens per `window` and allows a burst of the
/// same size.
pub struct GlobalRateLimiter {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl GlobalRateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        let burst = config.burst();
        let quota = Quota::with_period(config.window / burst.get())
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiter: RateLimiter::direct(quota),
        }
    }

    /// Take one token; `false` when the bucket is empty
    pub fn check(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

#[derive(Debug, Clone, Copy)]
struct RateCounter {
    count: u32,
    last_seen: Instant,
}

/// Per-key request counter
///
/// Each key keeps a count and the time of its last request. When more than
/// `window` has elapsed since the last request the count starts over. Every
/// request (including rejected ones) refreshes the last-seen time.
///
/// The read-modify-write for one key happens under that key's shard lock, so
/// concurrent requests for the same key are serialized.
pub struct WindowedCounterLimiter<K>
where
    K: Eq + Hash,
{
    counters: DashMap<K, RateCounter>,
    config: RateLimitConfig,
}

impl<K> WindowedCounterLimiter<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            counters: DashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Record a request for `key` now
    pub fn check(&self, key: K) -> bool {
        self.check_at(key, Instant::now())
    }

    /// Record a request for `key` at `now`; `true` when within the limit
    pub fn check_at(&self, key: K, now: Instant) -> bool {
        let mut entry = self.counters.entry(key).or_insert(RateCounter {
            count: 0,
            last_seen: now,
        });
        let counter = entry.value_mut();

        if now.saturating_duration_since(counter.last_seen) > self.config.window {
            counter.count = 0;
        }
        counter.count = counter.count.saturating_add(1);
        counter.last_seen = now;

        counter.count <= self.config.max_requests
    }

    /// Drop keys idle for longer than `max_idle`; returns how many were removed
    pub fn prune_at(&self, now: Instant, max_idle: Duration) -> usize {
        let before = self.counters.len();
        self.counters
            .retain(|_, counter| now.saturating_duration_since(counter.last_seen) <= max_idle);
        before.saturating_sub(self.counters.len())
    }

    /// Number of tracked keys
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}
