//! In-memory fakes shared by unit tests

use crate::error::FetchError;
use crate::results::{ProductSuggestion, SuggestionPage};
use crate::scope::ScopeDescriptor;
use crate::search::Navigator;
use crate::suggest::{IdleListKind, SuggestionSource};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// One recorded `fetch_page` call
#[derive(Debug, Clone, PartialEq)]
pub struct PageCall {
    pub query: String,
    pub scope: ScopeDescriptor,
    pub page: u32,
}

/// Scripted suggestion source.
///
/// Every query has `total_pages` pages (default 1) of `page_size` items named
/// `"{query} {page}.{n}"`.
#[derive(Default)]
pub struct FakeSource {
    total_pages: Mutex<HashMap<String, u32>>,
    failing_pages: Mutex<HashSet<(String, u32)>>,
    idle: Mutex<HashMap<IdleListKind, Vec<ProductSuggestion>>>,
    failing_idle: Mutex<HashSet<IdleListKind>>,
    page_calls: Mutex<Vec<PageCall>>,
    idle_calls: Mutex<Vec<(IdleListKind, Option<String>)>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages(self, query: &str, total: u32) -> Self {
        self.total_pages.lock().unwrap().insert(query.to_string(), total);
        self
    }

    pub fn failing_page(self, query: &str, page: u32) -> Self {
        self.failing_pages
            .lock()
            .unwrap()
            .insert((query.to_string(), page));
        self
    }

    pub fn with_idle(self, kind: IdleListKind, names: &[&str]) -> Self {
        let items = names
            .iter()
            .enumerate()
            .map(|(i, name)| ProductSuggestion::new(format!("{}-{}", kind, i), *name))
            .collect();
        self.idle.lock().unwrap().insert(kind, items);
        self
    }

    pub fn failing_idle(self, kind: IdleListKind) -> Self {
        self.failing_idle.lock().unwrap().insert(kind);
        self
    }

    pub fn page_calls(&self) -> Vec<PageCall> {
        self.page_calls.lock().unwrap().clone()
    }

    pub fn idle_calls(&self) -> Vec<(IdleListKind, Option<String>)> {
        self.idle_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SuggestionSource for FakeSource {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch_page(
        &self,
        query: &str,
        scope: &ScopeDescriptor,
        page: u32,
        page_size: u32,
    ) -> Result<SuggestionPage, FetchError> {
        self.page_calls.lock().unwrap().push(PageCall {
            query: query.to_string(),
            scope: scope.clone(),
            page,
        });

        if self
            .failing_pages
            .lock()
            .unwrap()
            .contains(&(query.to_string(), page))
        {
            return Err(FetchError::Status(503));
        }

        let total = *self.total_pages.lock().unwrap().get(query).unwrap_or(&1);
        let items = (0..page_size)
            .map(|n| {
                ProductSuggestion::new(
                    format!("{}-{}-{}", query, page, n),
                    format!("{} {}.{}", query, page, n),
                )
            })
            .collect();
        Ok(SuggestionPage::new(items, page, total))
    }

    async fn fetch_idle_list(
        &self,
        kind: IdleListKind,
        store_id: Option<&str>,
    ) -> Result<Vec<ProductSuggestion>, FetchError> {
        self.idle_calls
            .lock()
            .unwrap()
            .push((kind, store_id.map(String::from)));

        if self.failing_idle.lock().unwrap().contains(&kind) {
            return Err(FetchError::Network("connection reset".to_string()));
        }
        Ok(self.idle.lock().unwrap().get(&kind).cloned().unwrap_or_default())
    }
}

/// Navigator that remembers every destination
#[derive(Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}
