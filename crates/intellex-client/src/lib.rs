//! # intellex-client
//!
//! Callback delivery for the intellex worker: posts job result payloads
//! back to the API over HTTP.

pub mod api;

pub use api::{ApiClient, ApiClientConfig};
