//! Mock implementations for testing.
//!
//! Test doubles for every trait seam, usable from unit tests and from the
//! integration tests under `tests/`.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with scripted per-URL responses
//! - [`StaticFetcher`] - Content fetcher backed by a fixed table
//! - [`RecordingSink`] - Sink that records (or rejects, or stalls) deliveries

pub mod fetcher;
pub mod http;
pub mod sink;

pub use fetcher::StaticFetcher;
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use sink::RecordingSink;
