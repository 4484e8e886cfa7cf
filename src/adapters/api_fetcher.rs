//! Content fetcher backed by the cluster file-data endpoint.

use async_trait::async_trait;
use bytes::BytesMut;
use futures_util::StreamExt;
use std::sync::Arc;
use std::time::Duration;

use crate::traits::{ContentFetcher, FetchedContent, Headers, HttpClient, HttpError};

/// Upper bound on one fetch, handshake and body together.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Reads file heads via `GET <base>/api/v1/files/<id>/data`.
///
/// Only HTTP 200 yields content. Any other status comes back as
/// [`FetchedContent::failed`] carrying that status.
pub struct ApiContentFetcher {
    http: Arc<dyn HttpClient>,
    base_url: String,
    headers: Headers,
    timeout: Duration,
}

impl ApiContentFetcher {
    /// `base_url` is the scheme and authority, e.g. `https://cluster:8000`.
    pub fn new(http: Arc<dyn HttpClient>, base_url: impl Into<String>, headers: Headers) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            headers,
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn data_url(&self, file_id: &str) -> String {
        format!(
            "{}/api/v1/files/{}/data",
            self.base_url,
            urlencoding::encode(file_id)
        )
    }

    async fn read_head(&self, url: &str, max_bytes: usize) -> Result<FetchedContent, HttpError> {
        let mut body = match self.http.get_stream(url, &self.headers).await {
            Ok(body) => body,
            Err(HttpError::ServerError { status, .. }) => {
                return Ok(FetchedContent::failed(status));
            }
            Err(err) => return Err(err),
        };

        let mut buffer = BytesMut::new();
        while buffer.len() < max_bytes {
            match body.next().await {
                Some(chunk) => {
                    let chunk = chunk?;
                    let room = max_bytes - buffer.len();
                    buffer.extend_from_slice(&chunk[..chunk.len().min(room)]);
                }
                None => break,
            }
        }

        // `get_stream` only hands back a body for HTTP 200
        Ok(FetchedContent::ok(buffer.freeze()))
    }
}

#[async_trait]
impl ContentFetcher for ApiContentFetcher {
    async fn fetch(&self, file_id: &str, max_bytes: usize) -> Result<FetchedContent, HttpError> {
        let url = self.data_url(file_id);
        tracing::debug!("Fetching up to {} bytes from {}", max_bytes, url);

        match tokio::time::timeout(self.timeout, self.read_head(&url, max_bytes)).await {
            Ok(result) => result,
            Err(_) => Err(HttpError::Timeout(format!(
                "no complete response from {} within {}s",
                url,
                self.timeout.as_secs_f32()
            ))),
        }
    }
}
