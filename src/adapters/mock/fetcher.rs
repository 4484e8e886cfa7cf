//! Canned content fetcher for router tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{ContentFetcher, FetchedContent, HttpError};

/// Fetcher answering from a fixed table keyed by file id.
///
/// Unknown ids get a 404. Every call is recorded with the byte limit it
/// was made with.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    contents: Arc<Mutex<HashMap<String, Result<FetchedContent, HttpError>>>>,
    calls: Arc<Mutex<Vec<(String, usize)>>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `text` with status 200 for `file_id`.
    pub fn with_text(self, file_id: &str, text: &str) -> Self {
        self.insert(file_id, Ok(FetchedContent::ok(text.to_string())));
        self
    }

    /// Serve an empty body with `status` for `file_id`.
    pub fn with_status(self, file_id: &str, status: u16) -> Self {
        self.insert(file_id, Ok(FetchedContent::failed(status)));
        self
    }

    /// Fail the transport for `file_id`.
    pub fn with_error(self, file_id: &str, err: HttpError) -> Self {
        self.insert(file_id, Err(err));
        self
    }

    fn insert(&self, file_id: &str, result: Result<FetchedContent, HttpError>) {
        self.contents
            .lock()
            .unwrap()
            .insert(file_id.to_string(), result);
    }

    /// `(file_id, max_bytes)` for every fetch so far.
    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentFetcher for StaticFetcher {
    async fn fetch(&self, file_id: &str, max_bytes: usize) -> Result<FetchedContent, HttpError> {
        self.calls
            .lock()
            .unwrap()
            .push((file_id.to_string(), max_bytes));

        let entry = self.contents.lock().unwrap().get(file_id).cloned();
        match entry {
            Some(Ok(mut content)) => {
                content.body.truncate(max_bytes);
                Ok(content)
            }
            Some(Err(err)) => Err(err),
            None => Ok(FetchedContent::failed(404)),
        }
    }
}
