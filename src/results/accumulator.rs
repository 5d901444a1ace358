//! Pagination accumulator merging successive pages of one query

use super::types::{ProductSuggestion, SuggestionPage};
use crate::search::Generation;
use serde::Serialize;
use tracing::debug;

/// Pagination metadata for the current generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    /// Last page merged (0 before the first page arrives)
    pub current_page: u32,
    /// Whether further pages may be requested
    pub has_more: bool,
    /// A fetch is in flight
    pub is_loading: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 0,
            has_more: true,
            is_loading: false,
        }
    }
}

/// Coarse state of the accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Loading,
    Loaded,
}

/// Ordered, growing list of suggestions for a single generation.
///
/// At most one fetch is admitted at a time; `has_more == false` is terminal
/// until the next reset.
#[derive(Debug, Default)]
pub struct PaginationAccumulator {
    generation: Generation,
    items: Vec<ProductSuggestion>,
    state: PaginationState,
}

impl PaginationAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start over for a new generation, dropping everything accumulated
    pub fn reset(&mut self, generation: Generation) {
        self.generation = generation;
        self.items.clear();
        self.state = PaginationState::default();
    }

    /// Admit the first page fetch. `None` if anything was already requested.
    pub fn begin_first_page(&mut self) -> Option<u32> {
        if self.state.current_page != 0 || self.state.is_loading {
            return None;
        }
        self.state.is_loading = true;
        Some(1)
    }

    /// Admit the next page fetch after a scroll-near-bottom event.
    ///
    /// `None` while loading, before the first page, or once exhausted.
    pub fn begin_next_page(&mut self) -> Option<u32> {
        if self.state.is_loading || self.state.current_page == 0 || !self.state.has_more {
            return None;
        }
        self.state.is_loading = true;
        Some(self.state.current_page + 1)
    }

    /// Append a page.
    ///
    /// Returns false if nothing was in flight. A page numbered other than
    /// the one requested settles the fetch as a failure.
    pub fn apply_page(&mut self, page: SuggestionPage) -> bool {
        if !self.state.is_loading {
            debug!(
                "Ignoring unrequested page {} for generation {}",
                page.page_number, self.generation
            );
            return false;
        }
        let expected = self.state.current_page + 1;
        if page.page_number != expected {
            debug!(
                "Got page {} instead of {} for generation {}",
                page.page_number, expected, self.generation
            );
            self.apply_failure();
            return false;
        }

        self.state.current_page = page.page_number;
        self.state.has_more = page.has_more();
        self.state.is_loading = false;
        self.items.extend(page.items);
        true
    }

    /// Settle a failed fetch: keep what we have and stop paginating
    pub fn apply_failure(&mut self) {
        self.state.is_loading = false;
        self.state.has_more = false;
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn items(&self) -> &[ProductSuggestion] {
        &self.items
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        if self.state.is_loading {
            Phase::Loading
        } else if self.state.current_page == 0 && self.state.has_more {
            Phase::Empty
        } else {
            Phase::Loaded
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
