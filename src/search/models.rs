//! Query session data models

use crate::results::{PaginationState, ProductSuggestion};
use crate::scope::ScopeDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonic counter identifying one logical query.
///
/// Bumped on every text change and never reused within a session.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The controller's current query
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Query {
    /// Text as typed
    pub text: String,
    pub generation: Generation,
    /// Scope of the most recently issued fetch
    pub scope: Option<ScopeDescriptor>,
}

impl Query {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Scroll geometry of the suggestion list, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPosition {
    /// Distance scrolled from the top
    pub offset: f64,
    /// Visible height
    pub viewport: f64,
    /// Total content height
    pub content: f64,
}

impl ScrollPosition {
    pub fn new(offset: f64, viewport: f64, content: f64) -> Self {
        Self {
            offset,
            viewport,
            content,
        }
    }

    pub fn is_near_bottom(&self, threshold: f64) -> bool {
        self.offset + self.viewport >= self.content - threshold
    }
}

/// What applying a fetch outcome did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyStatus {
    /// Page merged into the current results
    Applied { page: u32, has_more: bool },
    /// Fetch failed; earlier pages kept, pagination stopped
    Failed,
    /// Outcome belongs to an abandoned generation and was dropped
    Stale,
    /// Current generation, but no fetch for that page was in flight
    Ignored,
}

/// What the search panel should render
#[derive(Debug, Clone, PartialEq)]
pub enum SearchView<'a> {
    /// Empty query: recent searches (idle lists are loaded separately)
    Idle { recent: &'a [String] },
    /// Non-empty query: accumulated suggestions
    Results {
        items: &'a [ProductSuggestion],
        pagination: PaginationState,
    },
}

impl SearchView<'_> {
    /// Settled with nothing to show. Failures and genuine misses look the same.
    pub fn is_no_results(&self) -> bool {
        matches!(self, SearchView::Results { items, pagination } if items.is_empty() && !pagination.is_loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_monotonic() {
        let g0 = Generation::default();
        let g1 = g0.next();
        let g2 = g1.next();
        assert!(g0 < g1 && g1 < g2);
        assert_eq!(g2.value(), 2);
        assert_eq!(g2.to_string(), "2");
    }

    #[test]
    fn test_scroll_near_bottom() {
        assert!(ScrollPosition::new(460.0, 500.0, 1000.0).is_near_bottom(50.0));
        assert!(!ScrollPosition::new(100.0, 500.0, 1000.0).is_near_bottom(50.0));
        // content shorter than the viewport
        assert!(ScrollPosition::new(0.0, 500.0, 200.0).is_near_bottom(0.0));
    }

    #[test]
    fn test_blank_query() {
        let query = Query {
            text: "   ".to_string(),
            ..Query::default()
        };
        assert!(query.is_blank());
    }
}
