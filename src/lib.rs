//! storefront-search: incremental product search for storefronts
//!
//! An as-you-type search box engine: scoped suggestion fetching, generation
//! gating of out-of-order responses, incremental pagination, a persistent
//! recent-search list and idle-state recommendation lists.

pub mod cache;
pub mod config;
pub mod error;
pub mod history;
pub mod idle;
pub mod network;
pub mod results;
pub mod scope;
pub mod search;
pub mod suggest;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Settings;
pub use error::{FetchError, StorageError, SubmitError};
pub use results::{ProductSuggestion, SuggestionPage};
pub use scope::{ScopeDescriptor, ScopeResolver};
pub use search::{SearchController, SearchView};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Suggestions requested per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: u32 = 10;
