//! Query session controller

use super::models::{ApplyStatus, Generation, Query, ScrollPosition, SearchView};
use super::navigation::{Navigator, RouteBuilder};
use crate::cache::IdleListCache;
use crate::config::Settings;
use crate::error::{StorageError, SubmitError};
use crate::history::{KeyValueStore, RecentSearches};
use crate::idle::{IdleLists, IdleStateProvider};
use crate::results::{PaginationAccumulator, PaginationState, ProductSuggestion};
use crate::scope::{ScopeResolver, StoreDirectory};
use crate::suggest::{FetchOutcome, FetchTicket, SuggestionFetcher, SuggestionSource};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Owns the current query and everything derived from it.
///
/// Transitions are synchronous. Issuing a fetch hands out a [`FetchTicket`];
/// the caller runs it on [`SuggestionFetcher`] and feeds the outcome back
/// through [`SearchController::apply`], which drops anything that does not
/// belong to the generation current at that moment.
pub struct SearchController {
    resolver: ScopeResolver,
    fetcher: SuggestionFetcher,
    idle: IdleStateProvider,
    history: RecentSearches,
    navigator: Arc<dyn Navigator>,
    routes: RouteBuilder,
    page_size: u32,
    scroll_threshold: f64,
    /// Caller context; `None` searches across every known store
    store_id: Option<String>,
    query: Query,
    accumulator: PaginationAccumulator,
    open: bool,
}

impl SearchController {
    /// Create a controller and load the persisted history
    pub fn new(
        settings: &Settings,
        source: Arc<dyn SuggestionSource>,
        directory: Arc<dyn StoreDirectory>,
        storage: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let history = RecentSearches::load(
            storage,
            settings.history.storage_key.clone(),
            settings.search.history_limit,
        );
        let idle = IdleStateProvider::new(
            source.clone(),
            IdleListCache::new(settings.search.idle_cache_ttl, 64),
        );

        Self {
            resolver: ScopeResolver::new(directory),
            fetcher: SuggestionFetcher::new(source),
            idle,
            history,
            navigator,
            routes: RouteBuilder::new(settings.routes.clone()),
            page_size: settings.search.page_size.max(1),
            scroll_threshold: settings.search.scroll_threshold,
            store_id: settings.store_id.clone(),
            query: Query::default(),
            accumulator: PaginationAccumulator::new(),
            open: false,
        }
    }

    /// Handle a text change.
    ///
    /// Always starts a new generation. Returns the page-1 ticket for
    /// non-blank text; blank text clears the results and falls back to the
    /// idle state without fetching.
    pub fn set_query(&mut self, text: &str) -> Option<FetchTicket> {
        let generation = self.query.generation.next();
        self.query.generation = generation;
        self.query.text = text.to_string();
        self.accumulator.reset(generation);
        self.open = true;

        if self.query.is_blank() {
            debug!("Query cleared at generation {}, showing idle state", generation);
            return None;
        }

        let page = self.accumulator.begin_first_page()?;
        Some(self.issue(page))
    }

    /// Handle the list being scrolled close to its end.
    ///
    /// Returns a ticket only when more pages exist and nothing is in flight.
    pub fn scroll_near_bottom(&mut self) -> Option<FetchTicket> {
        if self.query.is_blank() {
            return None;
        }
        let page = self.accumulator.begin_next_page()?;
        Some(self.issue(page))
    }

    /// Handle a raw scroll event
    pub fn on_scroll(&mut self, position: ScrollPosition) -> Option<FetchTicket> {
        if position.is_near_bottom(self.scroll_threshold) {
            self.scroll_near_bottom()
        } else {
            None
        }
    }

    /// Apply a finished fetch, if it still belongs to the current generation
    pub fn apply(&mut self, outcome: FetchOutcome) -> ApplyStatus {
        let FetchOutcome { ticket, result } = outcome;

        if ticket.generation != self.query.generation {
            debug!(
                "Dropping stale page {} of generation {} (current {})",
                ticket.page, ticket.generation, self.query.generation
            );
            return ApplyStatus::Stale;
        }

        if !self.accumulator.state().is_loading {
            return ApplyStatus::Ignored;
        }

        match result {
            Ok(page) => {
                let number = page.page_number;
                if self.accumulator.apply_page(page) {
                    let has_more = self.accumulator.state().has_more;
                    debug!(
                        "Applied page {} for '{}' ({} items, more: {})",
                        number,
                        ticket.text,
                        self.accumulator.len(),
                        has_more
                    );
                    ApplyStatus::Applied {
                        page: number,
                        has_more,
                    }
                } else {
                    warn!(
                        "Expected page {} for '{}', got page {}",
                        ticket.page, ticket.text, number
                    );
                    ApplyStatus::Failed
                }
            }
            Err(e) => {
                warn!(
                    "Suggestion fetch failed for '{}' page {}: {}",
                    ticket.text, ticket.page, e
                );
                self.accumulator.apply_failure();
                ApplyStatus::Failed
            }
        }
    }

    /// Run a ticket to completion and apply it
    pub async fn dispatch(&mut self, ticket: Option<FetchTicket>) -> Option<ApplyStatus> {
        let ticket = ticket?;
        let outcome = self.fetcher.fetch(ticket).await;
        Some(self.apply(outcome))
    }

    /// Type `text` and wait for its first page
    pub async fn input(&mut self, text: &str) -> Option<ApplyStatus> {
        let ticket = self.set_query(text);
        self.dispatch(ticket).await
    }

    /// Scroll to the bottom and wait for the next page
    pub async fn load_more(&mut self) -> Option<ApplyStatus> {
        let ticket = self.scroll_near_bottom();
        self.dispatch(ticket).await
    }

    /// Switch between a single store and all stores.
    ///
    /// A non-blank query is re-run against the new scope. With a blank query
    /// only the generation moves on; the panel's open state is untouched.
    pub fn set_store_context(&mut self, store_id: Option<String>) -> Option<FetchTicket> {
        if self.store_id == store_id {
            return None;
        }
        info!("Search context changed to {:?}", store_id);
        self.store_id = store_id;

        if self.query.is_blank() {
            let generation = self.query.generation.next();
            self.query.generation = generation;
            self.accumulator.reset(generation);
            return None;
        }
        let text = self.query.text.clone();
        self.set_query(&text)
    }

    /// Idle lists for the current store context
    pub async fn idle_lists(&self) -> IdleLists {
        let scope = self.resolver.resolve(self.store_id.as_deref());
        self.idle.load_idle_lists(&scope).await
    }

    /// Explicit search action: record the query and navigate to its results
    pub fn submit(&mut self, text: &str) -> Result<String, SubmitError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SubmitError::Blank);
        }

        if let Err(e) = self.history.record(text) {
            error!("Failed to persist recent searches: {}", e);
        }

        let path = self.routes.search_path(self.store_id.as_deref(), text);
        info!("Submitting search '{}' -> {}", text, path);
        self.open = false;
        self.navigator.navigate(&path);
        Ok(path)
    }

    /// A suggestion was picked: navigate to its product page
    pub fn select_suggestion(&mut self, product_id: &str) -> String {
        let path = self.routes.product_path(self.store_id.as_deref(), product_id);
        info!("Selected product {} -> {}", product_id, path);
        self.open = false;
        self.navigator.navigate(&path);
        path
    }

    pub fn remove_recent_search(&mut self, text: &str) -> Result<bool, StorageError> {
        self.history.remove(text)
    }

    pub fn clear_recent_searches(&mut self) -> Result<(), StorageError> {
        self.history.clear()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Outside click
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn view(&self) -> SearchView<'_> {
        if self.query.is_blank() {
            SearchView::Idle {
                recent: self.history.entries(),
            }
        } else {
            SearchView::Results {
                items: self.accumulator.items(),
                pagination: self.accumulator.state(),
            }
        }
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn generation(&self) -> Generation {
        self.query.generation
    }

    pub fn suggestions(&self) -> &[ProductSuggestion] {
        self.accumulator.items()
    }

    pub fn pagination(&self) -> PaginationState {
        self.accumulator.state()
    }

    pub fn recent_searches(&self) -> &[String] {
        self.history.entries()
    }

    pub fn store_id(&self) -> Option<&str> {
        self.store_id.as_deref()
    }

    pub fn fetcher(&self) -> SuggestionFetcher {
        self.fetcher.clone()
    }

    /// Build a ticket, resolving the scope against the live store set
    fn issue(&mut self, page: u32) -> FetchTicket {
        let scope = self.resolver.resolve(self.store_id.as_deref());
        self.query.scope = Some(scope.clone());
        debug!(
            "Issuing page {} of '{}' (generation {})",
            page, self.query.text, self.query.generation
        );

        FetchTicket {
            generation: self.query.generation,
            text: self.query.text.trim().to_string(),
            scope,
            page,
            page_size: self.page_size,
        }
    }
}
