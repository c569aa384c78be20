//! Read Cache
//!
//! Short-lived cache for list pages. Entries expire by age only; writes
//! never invalidate them, so a new submission may take up to one TTL to
//! appear in cached pages.

use dashmap::DashMap;
use std::time::{Duration, Instant};

use crate::domain::repository::BenchmarkPage;

#[derive(Debug, Clone)]
struct CacheEntry {
    page: BenchmarkPage,
    stored_at: Instant,
}

pub struct ReadCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl ReadCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, key: &str) -> Option<BenchmarkPage> {
        self.get_at(key, Instant::now())
    }

    /// Hit only while the entry is younger than the TTL
    pub fn get_at(&self, key: &str, now: Instant) -> Option<BenchmarkPage> {
        let entry = self.entries.get(key)?;
        if now.saturating_duration_since(entry.stored_at) < self.ttl {
            Some(entry.page.clone())
        } else {
            None
        }
    }

    pub fn put(&self, key: String, page: BenchmarkPage) {
        self.put_at(key, page, Instant::now());
    }

    pub fn put_at(&self, key: String, page: BenchmarkPage, now: Instant) {
        self.entries.insert(
            key,
            CacheEntry {
                page,
                stored_at: now,
            },
        );
    }

    /// Remove expired entries; returns how many were dropped
    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.stored_at) < self.ttl);
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(total: u64) -> BenchmarkPage {
        BenchmarkPage {
            benchmarks: Vec::new(),
            total,
        }
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let cache = ReadCache::new(Duration::from_secs(5));
        let t0 = Instant::now();
        cache.put_at("k".into(), page(3), t0);

        assert_eq!(cache.get_at("k", t0 + Duration::from_secs(4)), Some(page(3)));
        assert_eq!(cache.get_at("k", t0 + Duration::from_secs(5)), None);
        assert_eq!(cache.get_at("other", t0), None);
    }

    #[test]
    fn test_put_replaces_entry() {
        let cache = ReadCache::new(Duration::from_secs(5));
        let t0 = Instant::now();
        cache.put_at("k".into(), page(1), t0);
        cache.put_at("k".into(), page(2), t0 + Duration::from_secs(6));

        assert_eq!(cache.get_at("k", t0 + Duration::from_secs(7)), Some(page(2)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_purge_expired() {
        let cache = ReadCache::new(Duration::from_secs(5));
        let t0 = Instant::now();
        cache.put_at("old".into(), page(1), t0);
        cache.put_at("new".into(), page(2), t0 + Duration::from_secs(4));

        assert_eq!(cache.purge_expired_at(t0 + Duration::from_secs(6)), 1);
        assert!(cache.get_at("new", t0 + Duration::from_secs(6)).is_some());
    }
}
