//! Suggestion types and the pagination accumulator
//!
//! This module defines the product/page structures returned by the backend
//! and the component that merges successive pages into one ordered list.

mod accumulator;
mod types;

pub use accumulator::{PaginationAccumulator, PaginationState, Phase};
pub use types::*;
