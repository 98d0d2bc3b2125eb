use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use super::results::DiscoveredService;

/// Caller-owned memo of recent discovery results with a fixed TTL.
///
/// There is deliberately no process-wide instance: whoever wants reuse
/// across scans constructs one and passes it by reference.
pub struct DiscoveryCache {
    entries: RwLock<HashMap<String, CachedScan>>,
    ttl: Duration,
}

struct CachedScan {
    services: Vec<DiscoveredService>,
    stored_at: Instant,
}

impl DiscoveryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn get(&self, key: &str) -> Option<Vec<DiscoveredService>> {
        let entries = self.entries.read().ok()?;
        let cached = entries.get(key)?;
        if cached.stored_at.elapsed() < self.ttl {
            Some(cached.services.clone())
        } else {
            None
        }
    }

    pub fn store(&self, key: &str, services: Vec<DiscoveredService>) {
        if let Ok(mut entries) = self.entries.write() {
            // Drop expired entries while we hold the write lock anyway.
            let ttl = self.ttl;
            entries.retain(|_, cached| cached.stored_at.elapsed() < ttl);
            entries.insert(
                key.to_string(),
                CachedScan {
                    services,
                    stored_at: Instant::now(),
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::results::ServiceKind;

    fn sample_service() -> DiscoveredService {
        DiscoveredService {
            host: "localhost".into(),
            port: 6379,
            name: "redis-6379".into(),
            kind: ServiceKind::Redis,
        }
    }

    #[test]
    fn fresh_entry_is_served() {
        let cache = DiscoveryCache::new(Duration::from_secs(60));
        cache.store("localhost", vec![sample_service()]);
        let hit = cache.get("localhost").unwrap();
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].port, 6379);
    }

    #[test]
    fn expired_entry_is_a_miss() {
        let cache = DiscoveryCache::new(Duration::ZERO);
        cache.store("localhost", vec![sample_service()]);
        assert!(cache.get("localhost").is_none());
    }

    #[test]
    fn keys_do_not_bleed_into_each_other() {
        let cache = DiscoveryCache::new(Duration::from_secs(60));
        cache.store("localhost", vec![sample_service()]);
        assert!(cache.get("127.0.0.1").is_none());
    }
}
