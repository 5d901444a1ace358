//! Idle-state lists
//!
//! What the search panel shows while the query is empty: popular,
//! recommended and featured products for the current scope. Lists are
//! fetched once per scope and kept until the scope changes. A load where
//! any list failed is shown but not kept, so the next idle view retries.

use crate::cache::IdleListCache;
use crate::results::ProductSuggestion;
use crate::scope::ScopeDescriptor;
use crate::suggest::{IdleListKind, SuggestionSource};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Lists shown in the idle state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IdleLists {
    pub popular: Vec<ProductSuggestion>,
    pub featured: Vec<ProductSuggestion>,
    pub recommended: Vec<ProductSuggestion>,
}

impl IdleLists {
    pub fn get(&self, kind: IdleListKind) -> &[ProductSuggestion] {
        match kind {
            IdleListKind::Popular => &self.popular,
            IdleListKind::Recommended => &self.recommended,
            IdleListKind::Featured => &self.featured,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.popular.is_empty() && self.featured.is_empty() && self.recommended.is_empty()
    }
}

/// Loads and memoizes idle lists per scope
pub struct IdleStateProvider {
    source: Arc<dyn SuggestionSource>,
    cache: IdleListCache,
    /// Cache key of the scope currently being served
    active: Mutex<Option<String>>,
}

impl IdleStateProvider {
    pub fn new(source: Arc<dyn SuggestionSource>, cache: IdleListCache) -> Self {
        Self {
            source,
            cache,
            active: Mutex::new(None),
        }
    }

    /// Lists for `scope`, fetching them the first time the scope is seen.
    ///
    /// Each list fails independently and comes back empty on failure.
    pub async fn load_idle_lists(&self, scope: &ScopeDescriptor) -> IdleLists {
        if let Some(previous) = self.activate(scope) {
            debug!("Idle scope changed, dropping lists for {}", previous);
            self.cache.remove_key(&previous).await;
        }

        self.cache.get_or_load(scope, self.fetch_all(scope)).await
    }

    /// Lists already loaded for `scope`; empty while loading or never loaded
    pub async fn lists(&self, scope: &ScopeDescriptor) -> IdleLists {
        self.cache.get(scope).await.unwrap_or_default()
    }

    /// Mark `scope` active, returning the previously active key if it differs
    fn activate(&self, scope: &ScopeDescriptor) -> Option<String> {
        let key = scope.cache_key();
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        match active.replace(key.clone()) {
            Some(previous) if previous != key => Some(previous),
            _ => None,
        }
    }

    /// `Err` holds the lists that did load when any of the three failed
    async fn fetch_all(&self, scope: &ScopeDescriptor) -> Result<IdleLists, IdleLists> {
        let store_id = scope.store_id();
        let (popular, recommended, featured) = futures::join!(
            self.fetch_list(IdleListKind::Popular, store_id),
            self.fetch_list(IdleListKind::Recommended, store_id),
            self.fetch_list(IdleListKind::Featured, store_id),
        );

        let complete = popular.is_some() && recommended.is_some() && featured.is_some();
        let lists = IdleLists {
            popular: popular.unwrap_or_default(),
            featured: featured.unwrap_or_default(),
            recommended: recommended.unwrap_or_default(),
        };
        if complete {
            Ok(lists)
        } else {
            Err(lists)
        }
    }

    async fn fetch_list(
        &self,
        kind: IdleListKind,
        store_id: Option<&str>,
    ) -> Option<Vec<ProductSuggestion>> {
        match self.source.fetch_idle_list(kind, store_id).await {
            Ok(items) => Some(items),
            Err(e) => {
                warn!("Failed to load {} products: {}", kind, e);
                None
            }
        }
    }
}
