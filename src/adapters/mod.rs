//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`ApiContentFetcher`] - File heads from the cluster data endpoint
//! - [`ConsoleSink`] - Notifications printed to stdout
//! - [`WebhookSink`] - Notifications posted to a chat webhook
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles for every seam.

pub mod api_fetcher;
pub mod console_sink;
pub mod mock;
pub mod reqwest_http;
pub mod webhook_sink;

pub use api_fetcher::ApiContentFetcher;
pub use console_sink::ConsoleSink;
pub use mock::{MockHttpClient, RecordingSink, StaticFetcher};
pub use reqwest_http::ReqwestHttpClient;
pub use webhook_sink::WebhookSink;
