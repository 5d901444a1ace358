//! Generation-tagged page fetching

use super::backends::SuggestionSource;
use crate::error::FetchError;
use crate::results::SuggestionPage;
use crate::scope::ScopeDescriptor;
use crate::search::Generation;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// A page fetch admitted by the controller, tagged with its generation
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub generation: Generation,
    pub text: String,
    /// Scope captured when the fetch was issued
    pub scope: ScopeDescriptor,
    pub page: u32,
    pub page_size: u32,
}

/// Result of executing a [`FetchTicket`]
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<SuggestionPage, FetchError>,
}

/// Runs tickets against a suggestion source
#[derive(Clone)]
pub struct SuggestionFetcher {
    source: Arc<dyn SuggestionSource>,
}

impl SuggestionFetcher {
    pub fn new(source: Arc<dyn SuggestionSource>) -> Self {
        Self { source }
    }

    /// Execute a ticket. Failures come back inside the outcome.
    pub async fn fetch(&self, ticket: FetchTicket) -> FetchOutcome {
        if ticket.scope.is_empty() {
            debug!(
                "No stores known, generation {} page {} is empty",
                ticket.generation, ticket.page
            );
            let result = Ok(SuggestionPage::empty(ticket.page));
            return FetchOutcome { ticket, result };
        }

        let start = Instant::now();
        let result = self
            .source
            .fetch_page(&ticket.text, &ticket.scope, ticket.page, ticket.page_size)
            .await;

        debug!(
            "{} answered generation {} page {} in {:?}",
            self.source.name(),
            ticket.generation,
            ticket.page,
            start.elapsed()
        );

        FetchOutcome { ticket, result }
    }
}
