//! Application Configuration
//!
//! Configuration for ingestion and the read endpoints.

use platform::rate_limit::RateLimitConfig;
use std::time::Duration;

/// Ingestion configuration
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Process-wide submission budget
    pub global_limit: RateLimitConfig,
    /// Budget per transport address
    pub per_source_limit: RateLimitConfig,
    /// Deadline for every store round trip
    pub store_timeout: Duration,
    /// How long a list page is served from cache
    pub cache_ttl: Duration,
    /// Sweep period for idle throttle keys and expired cache entries
    pub maintenance_interval: Duration,
    /// Honor `X-Forwarded-For` (only behind a trusted proxy)
    pub trust_forwarded_for: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            global_limit: RateLimitConfig::new(10, Duration::from_secs(1)),
            per_source_limit: RateLimitConfig::new(1, Duration::from_secs(1)),
            store_timeout: Duration::from_secs(5),
            cache_ttl: Duration::from_secs(5),
            maintenance_interval: Duration::from_secs(60),
            trust_forwarded_for: false,
        }
    }
}

impl IngestConfig {
    /// Defaults suitable for local development
    pub fn development() -> Self {
        Self::default()
    }

    pub fn with_trust_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }
}
