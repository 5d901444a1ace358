//! Query session orchestration
//!
//! Owns the current query and its generation, gates fetch outcomes,
//! accumulates pages and hands submissions off to navigation.

mod controller;
mod models;
mod navigation;

pub use controller::SearchController;
pub use models::*;
pub use navigation::{Navigator, RouteBuilder};
