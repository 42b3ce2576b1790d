use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::core::models::Response;

#[derive(Clone, Debug)]
struct CacheEntry {
    value: Response,
    created_at: Instant,
    ttl: Option<Duration>,
}

/// Time-expiring response store keyed by resolved request URL.
///
/// Expiry is lazy: an entry past its effective ttl (its own, else the
/// constructor default) is removed on the next lookup of its key. No per-entry
/// timers, no background sweep.
#[derive(Debug)]
pub struct Cache {
    map: RwLock<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
}

impl Cache {
    #[must_use]
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
            default_ttl,
        }
    }

    /// Look up a live entry, collecting it if it has expired.
    pub async fn get(&self, key: &str) -> Option<Response> {
        {
            let guard = self.map.read().await;
            match guard.get(key) {
                None => return None,
                Some(entry) if !self.expired(entry) => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        // Expired on the read path; re-check under the write lock since a
        // writer may have replaced the entry in between.
        let mut guard = self.map.write().await;
        if let Some(entry) = guard.get(key) {
            if self.expired(entry) {
                guard.remove(key);
                return None;
            }
            return Some(entry.value.clone());
        }
        None
    }

    /// Store `value`, overwriting any entry for `key` and resetting its age.
    pub async fn set(&self, key: &str, value: Response, ttl_override: Option<Duration>) {
        let entry = CacheEntry {
            value,
            created_at: Instant::now(),
            ttl: ttl_override,
        };
        let mut guard = self.map.write().await;
        guard.insert(key.to_owned(), entry);
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        let mut guard = self.map.write().await;
        guard.clear();
    }

    /// Number of stored entries, counting expired ones not yet collected.
    pub async fn len(&self) -> usize {
        self.map.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn expired(&self, entry: &CacheEntry) -> bool {
        entry.created_at.elapsed() > entry.ttl.unwrap_or(self.default_ttl)
    }
}
