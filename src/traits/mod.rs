//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP transport (POST, streaming GET)
//! - [`ContentFetcher`] - Reads the head of a changed file
//! - [`NotificationSink`] - Delivers a finished notification

pub mod fetcher;
pub mod http;
pub mod sink;

pub use fetcher::{ContentFetcher, FetchedContent};
pub use http::{ByteStream, Headers, HttpClient, HttpError, Response, TlsPolicy};
pub use sink::{NotificationSink, SinkError};
