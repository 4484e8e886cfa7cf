//! Content fetch seam used by the router for new-file snippets.

use async_trait::async_trait;
use bytes::Bytes;

use super::http::HttpError;

/// Head of a file's content plus the status it was served with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedContent {
    pub status: u16,
    /// At most `max_bytes` of the body; empty unless `status` is 200
    pub body: Bytes,
}

impl FetchedContent {
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn failed(status: u16) -> Self {
        Self {
            status,
            body: Bytes::new(),
        }
    }

    /// Only a 200 carries usable content.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Reads up to `max_bytes` of a file identified by its spine id.
///
/// An HTTP error status is a normal [`FetchedContent`]; `Err` is reserved
/// for transport failures.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, file_id: &str, max_bytes: usize) -> Result<FetchedContent, HttpError>;
}
