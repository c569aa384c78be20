//! Abuse Throttle
//!
//! Two budgets guard ingestion: a process-wide token bucket checked before
//! any decryption work, and a per-source counter keyed by the transport
//! address, checked once the submission is otherwise valid.

use platform::rate_limit::{GlobalRateLimiter, WindowedCounterLimiter};
use std::net::IpAddr;
use std::time::Instant;

use crate::application::config::IngestConfig;

pub struct AbuseThrottle {
    global: GlobalRateLimiter,
    per_source: WindowedCounterLimiter<IpAddr>,
}

impl AbuseThrottle {
    pub fn new(config: &IngestConfig) -> Self {
        Self {
            global: GlobalRateLimiter::new(&config.global_limit),
            per_source: WindowedCounterLimiter::new(config.per_source_limit.clone()),
        }
    }

    pub fn admit_global(&self) -> bool {
        self.global.check()
    }

    pub fn admit_source(&self, client_ip: IpAddr) -> bool {
        self.admit_source_at(client_ip, Instant::now())
    }

    pub fn admit_source_at(&self, client_ip: IpAddr, now: Instant) -> bool {
        self.per_source.check_at(client_ip, now)
    }

    /// Forget sources idle longer than one window
    pub fn sweep_at(&self, now: Instant) -> usize {
        let window = self.per_source.config().window;
        self.per_source.prune_at(now, window)
    }

    pub fn tracked_sources(&self) -> usize {
        self.per_source.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_per_source_window() {
        let throttle = AbuseThrottle::new(&IngestConfig::default());
        let ip: IpAddr = "192.0.2.10".parse().unwrap();
        let other: IpAddr = "192.0.2.11".parse().unwrap();
        let t0 = Instant::now();

        assert!(throttle.admit_source_at(ip, t0));
        assert!(!throttle.admit_source_at(ip, t0 + Duration::from_millis(100)));
        assert!(throttle.admit_source_at(other, t0 + Duration::from_millis(100)));
        assert!(throttle.admit_source_at(ip, t0 + Duration::from_millis(1_200)));
    }

    #[test]
    fn test_global_budget() {
        let throttle = AbuseThrottle::new(&IngestConfig::default());
        let admitted = (0..25).filter(|_| throttle.admit_global()).count();
        assert_eq!(admitted, 10);
    }

    #[test]
    fn test_sweep_drops_idle_sources() {
        let throttle = AbuseThrottle::new(&IngestConfig::default());
        let t0 = Instant::now();
        throttle.admit_source_at("192.0.2.1".parse().unwrap(), t0);
        throttle.admit_source_at("192.0.2.2".parse().unwrap(), t0 + Duration::from_secs(2));

        assert_eq!(throttle.sweep_at(t0 + Duration::from_millis(2_500)), 1);
        assert_eq!(throttle.tracked_sources(), 1);
    }
}
