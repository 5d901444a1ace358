//! Suggestion fetching
//!
//! Backends that answer paginated product-suggestion and idle-list requests,
//! and the fetcher that runs generation-tagged tickets against them.

mod backends;
mod fetcher;

pub use backends::{HttpCatalog, IdleListKind, SuggestionSource};
pub use fetcher::{FetchOutcome, FetchTicket, SuggestionFetcher};
