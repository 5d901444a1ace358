//! Caching module
//!
//! Memoizes idle lists per scope so switching back and forth between an
//! empty and a non-empty query does not hit the backend again.

use crate::idle::IdleLists;
use crate::scope::ScopeDescriptor;
use moka::future::Cache;
use std::time::Duration;

/// Per-scope cache of idle lists
#[derive(Clone)]
pub struct IdleListCache {
    cache: Cache<String, IdleLists>,
}

impl IdleListCache {
    /// Create a cache whose entries expire after `ttl_seconds`
    pub fn new(ttl_seconds: u64, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(ttl_seconds))
            .max_capacity(max_capacity)
            .build();

        Self { cache }
    }

    pub async fn get(&self, scope: &ScopeDescriptor) -> Option<IdleLists> {
        self.cache.get(&scope.cache_key()).await
    }

    pub async fn set(&self, scope: &ScopeDescriptor, lists: IdleLists) {
        self.cache.insert(scope.cache_key(), lists).await;
    }

    /// Cached lists for `scope`, or the result of `load`.
    ///
    /// Concurrent callers for the same scope share a single `load`. Only
    /// `Ok` lists are kept; `Err` carries partial lists that are returned
    /// but not cached.
    pub async fn get_or_load<F>(&self, scope: &ScopeDescriptor, load: F) -> IdleLists
    where
        F: std::future::Future<Output = Result<IdleLists, IdleLists>>,
    {
        self.cache
            .try_get_with(scope.cache_key(), load)
            .await
            .unwrap_or_else(|partial| IdleLists::clone(&partial))
    }

    /// Forget one scope
    pub async fn remove_key(&self, key: &str) {
        self.cache.invalidate(key).await;
    }
}

impl Default for IdleListCache {
    fn default() -> Self {
        Self::new(600, 64) // 10 minutes TTL
    }
}
