//! Turns decoded change events into notifications.
//!
//! For every event, in arrival order, the router asks the [`WatchPolicy`]
//! whether it is notification-worthy, fetches a content snippet for file
//! events, and hands exactly one payload to the sink. Fetch problems only
//! degrade the snippet; they never stop the batch.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::StreamError;
use crate::models::{ChangeEvent, ChangeEventType, EventLocation, NotificationPayload};
use crate::policy::WatchPolicy;
use crate::traits::{ContentFetcher, NotificationSink};

/// Lines of file content kept in a snippet.
pub const DEFAULT_TAIL_LINES: usize = 10;

/// Bytes read from the head of a file before taking its tail.
pub const DEFAULT_MAX_FETCH_BYTES: usize = 20_000;

/// Placeholder snippet for events that carry no file id.
pub const NO_FILE_ID_SNIPPET: &str = "(no file id in event)";

/// What the router will do with one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Skip,
    NewFile {
        location: EventLocation,
        file_id: Option<String>,
    },
    NewDirectory {
        location: EventLocation,
    },
}

/// Per-batch counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteSummary {
    /// Events examined
    pub considered: usize,
    /// Payloads the sink accepted
    pub delivered: usize,
    /// File payloads sent with a placeholder instead of content
    pub degraded: usize,
    /// Payloads the sink failed to deliver
    pub failed: usize,
}

impl RouteSummary {
    pub fn merge(&mut self, other: RouteSummary) {
        self.considered += other.considered;
        self.delivered += other.delivered;
        self.degraded += other.degraded;
        self.failed += other.failed;
    }
}

pub struct EventRouter {
    policy: Arc<WatchPolicy>,
    fetcher: Arc<dyn ContentFetcher>,
    sink: Arc<dyn NotificationSink>,
    tail_lines: usize,
    max_fetch_bytes: usize,
}

impl EventRouter {
    pub fn new(
        policy: Arc<WatchPolicy>,
        fetcher: Arc<dyn ContentFetcher>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            policy,
            fetcher,
            sink,
            tail_lines: DEFAULT_TAIL_LINES,
            max_fetch_bytes: DEFAULT_MAX_FETCH_BYTES,
        }
    }

    pub fn with_tail_lines(mut self, tail_lines: usize) -> Self {
        self.tail_lines = tail_lines;
        self
    }

    pub fn with_max_fetch_bytes(mut self, max_fetch_bytes: usize) -> Self {
        self.max_fetch_bytes = max_fetch_bytes;
        self
    }

    pub fn policy(&self) -> &WatchPolicy {
        &self.policy
    }

    /// Classify one event without side effects.
    ///
    /// File events need a watched type, extension and directory; directory
    /// events only need the type and directory. An event that fails the
    /// file rule is still eligible for the directory rule.
    pub fn decide(&self, event: &ChangeEvent) -> RouteDecision {
        if !self.policy.watches_event(&event.event_type) {
            return RouteDecision::Skip;
        }

        let location = event.location();
        let in_watched_dir = self.policy.watches_directory(&location.directory);

        if event.event_type.is_file_content()
            && in_watched_dir
            && self.policy.watches_extension(&location.extension)
        {
            RouteDecision::NewFile {
                location,
                file_id: event.file_id().map(str::to_string),
            }
        } else if event.event_type == ChangeEventType::DirAdded && in_watched_dir {
            RouteDecision::NewDirectory { location }
        } else {
            RouteDecision::Skip
        }
    }

    /// Route one decoded batch, strictly in order.
    ///
    /// The only error is [`StreamError::Cancelled`]; everything else is
    /// logged and counted in the summary.
    pub async fn route(
        &self,
        batch: &[ChangeEvent],
        cancel: &CancellationToken,
    ) -> Result<RouteSummary, StreamError> {
        let mut summary = RouteSummary::default();

        for event in batch {
            if cancel.is_cancelled() {
                return Err(StreamError::Cancelled);
            }
            summary.considered += 1;

            let payload = match self.decide(event) {
                RouteDecision::Skip => {
                    debug!("Skipping {} event for {}", event.event_type, event.path);
                    continue;
                }
                RouteDecision::NewFile { location, file_id } => {
                    let (snippet, degraded) = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return Err(StreamError::Cancelled),
                        snippet = self.snippet_for(file_id.as_deref()) => snippet,
                    };
                    if degraded {
                        summary.degraded += 1;
                    }
                    NotificationPayload::new_file(location.basename, location.directory, snippet)
                }
                RouteDecision::NewDirectory { location } => {
                    NotificationPayload::new_directory(location.basename, location.directory)
                }
            };

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(StreamError::Cancelled),
                result = self.sink.deliver(&payload) => result,
            };

            match result {
                Ok(()) => {
                    info!(
                        "Sent {} notification for {} in {} via {}",
                        payload.kind,
                        payload.basename,
                        payload.directory,
                        self.sink.name()
                    );
                    summary.delivered += 1;
                }
                Err(err) => {
                    warn!(
                        "{} sink failed to deliver {} notification for {}: {}",
                        self.sink.name(),
                        payload.kind,
                        payload.basename,
                        err
                    );
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Tail of the file content, or a placeholder. The flag is true for
    /// placeholders.
    async fn snippet_for(&self, file_id: Option<&str>) -> (String, bool) {
        let Some(file_id) = file_id else {
            return (NO_FILE_ID_SNIPPET.to_string(), true);
        };

        match self.fetcher.fetch(file_id, self.max_fetch_bytes).await {
            Ok(content) if content.is_ok() => {
                let text = decode_ignoring_invalid(&content.body);
                (tail_lines(&text, self.tail_lines), false)
            }
            Ok(content) => {
                warn!("Fetching file {} returned HTTP {}", file_id, content.status);
                (format!("(error {} fetching data)", content.status), true)
            }
            Err(err) => {
                warn!("Fetching file {} failed: {}", file_id, err);
                (format!("(error fetching data: {})", err), true)
            }
        }
    }
}

/// Last `n` lines of `text` in their original order, joined with `\n`.
///
/// Fewer than `n` lines means all of them. The trailing newline, if any,
/// is not kept.
pub fn tail_lines(text: &str, n: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}

/// UTF-8 decode that drops undecodable bytes, including a character cut in
/// half by the fetch limit.
fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|&c| c != char::REPLACEMENT_CHARACTER)
        .collect()
}
