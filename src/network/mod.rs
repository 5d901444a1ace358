//! HTTP networking module
//!
//! Provides the HTTP client used to reach the storefront backend.

mod client;

pub use client::{ApiRequest, ApiResponse, HttpClient};
