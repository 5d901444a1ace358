//! Search scope resolution
//!
//! A search either targets one store or every store currently known to the
//! storefront. The cross-store set is read from the live [`StoreDirectory`]
//! each time a fetch is issued.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Backend search target
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScopeDescriptor {
    /// A single store
    Store {
        #[serde(rename = "storeId")]
        store_id: String,
    },
    /// The aggregate of all known stores. Empty is valid and yields no results.
    CrossStore {
        #[serde(rename = "storeIds")]
        store_ids: BTreeSet<String>,
    },
}

impl ScopeDescriptor {
    pub fn store(store_id: impl Into<String>) -> Self {
        ScopeDescriptor::Store {
            store_id: store_id.into(),
        }
    }

    pub fn cross_store<I, S>(store_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScopeDescriptor::CrossStore {
            store_ids: store_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Store id when scoped to a single store
    pub fn store_id(&self) -> Option<&str> {
        match self {
            ScopeDescriptor::Store { store_id } => Some(store_id),
            ScopeDescriptor::CrossStore { .. } => None,
        }
    }

    /// True for a cross-store scope with no stores in it
    pub fn is_empty(&self) -> bool {
        matches!(self, ScopeDescriptor::CrossStore { store_ids } if store_ids.is_empty())
    }

    /// Comma-joined store ids, as the cross-store endpoint expects them
    pub fn joined_store_ids(&self) -> String {
        match self {
            ScopeDescriptor::Store { store_id } => store_id.clone(),
            ScopeDescriptor::CrossStore { store_ids } => {
                store_ids.iter().map(String::as_str).collect::<Vec<_>>().join(",")
            }
        }
    }

    /// Key idle lists are memoized under.
    ///
    /// Cross-store idle lists are the global ones, so every cross-store
    /// scope shares a key whatever its store set.
    pub fn cache_key(&self) -> String {
        match self {
            ScopeDescriptor::Store { store_id } => format!("store:{}", store_id),
            ScopeDescriptor::CrossStore { .. } => "cross-store".to_string(),
        }
    }
}

/// Source of the stores currently available to the shopper
pub trait StoreDirectory: Send + Sync {
    fn known_store_ids(&self) -> BTreeSet<String>;
}

/// Store directory kept in memory and updated by the host application
#[derive(Debug, Default)]
pub struct InMemoryStoreDirectory {
    stores: RwLock<BTreeSet<String>>,
}

impl InMemoryStoreDirectory {
    pub fn new<I, S>(stores: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stores: RwLock::new(stores.into_iter().map(Into::into).collect()),
        }
    }

    /// Replace the whole store set
    pub fn set_stores<I, S>(&self, stores: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let next: BTreeSet<String> = stores.into_iter().map(Into::into).collect();
        if let Ok(mut guard) = self.stores.write() {
            *guard = next;
        }
    }

    pub fn add_store(&self, store_id: impl Into<String>) {
        if let Ok(mut guard) = self.stores.write() {
            guard.insert(store_id.into());
        }
    }

    pub fn remove_store(&self, store_id: &str) {
        if let Ok(mut guard) = self.stores.write() {
            guard.remove(store_id);
        }
    }
}

impl StoreDirectory for InMemoryStoreDirectory {
    fn known_store_ids(&self) -> BTreeSet<String> {
        self.stores
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

/// Decides which scope a search runs against
#[derive(Clone)]
pub struct ScopeResolver {
    directory: Arc<dyn StoreDirectory>,
}

impl ScopeResolver {
    pub fn new(directory: Arc<dyn StoreDirectory>) -> Self {
        Self { directory }
    }

    /// Resolve the scope for the given caller context
    pub fn resolve(&self, store_id: Option<&str>) -> ScopeDescriptor {
        match store_id {
            Some(id) => ScopeDescriptor::store(id),
            None => {
                let store_ids = self.directory.known_store_ids();
                debug!("Resolved cross-store scope over {} stores", store_ids.len());
                ScopeDescriptor::CrossStore { store_ids }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_store_scope() {
        let resolver = ScopeResolver::new(Arc::new(InMemoryStoreDirectory::new(["S1", "S2"])));
        assert_eq!(resolver.resolve(Some("S1")), ScopeDescriptor::store("S1"));
    }

    #[test]
    fn test_resolve_cross_store_scope() {
        let resolver = ScopeResolver::new(Arc::new(InMemoryStoreDirectory::new(["S1", "S2"])));
        assert_eq!(
            resolver.resolve(None),
            ScopeDescriptor::cross_store(["S1", "S2"])
        );
    }

    #[test]
    fn test_empty_directory_still_resolves() {
        let resolver = ScopeResolver::new(Arc::new(InMemoryStoreDirectory::default()));
        let scope = resolver.resolve(None);
        assert!(scope.is_empty());
        assert_eq!(scope.joined_store_ids(), "");
    }

    #[test]
    fn test_resolution_reads_live_directory() {
        let directory = Arc::new(InMemoryStoreDirectory::new(["S1"]));
        let resolver = ScopeResolver::new(directory.clone());
        assert_eq!(resolver.resolve(None), ScopeDescriptor::cross_store(["S1"]));

        directory.add_store("S3");
        directory.remove_store("S1");
        assert_eq!(resolver.resolve(None), ScopeDescriptor::cross_store(["S3"]));
    }

    #[test]
    fn test_cache_key_and_join() {
        let scope = ScopeDescriptor::cross_store(["b", "a"]);
        assert_eq!(scope.joined_store_ids(), "a,b");
        assert_eq!(scope.cache_key(), "cross-store");
        assert_eq!(ScopeDescriptor::cross_store(["c"]).cache_key(), "cross-store");
        assert_eq!(ScopeDescriptor::store("S1").cache_key(), "store:S1");
    }
}
