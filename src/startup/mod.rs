//! Startup wiring: load configuration, build the collaborators, assemble
//! the [`Monitor`].
//!
//! Every builder takes its dependencies as arguments so tests can swap in
//! mocks for the HTTP client and the sink.
//!
//! # Usage
//!
//! ```ignore
//! let (config, policy) = load_startup(&options.config_path, &options.watch_path)?;
//! let http = build_http_client(&config)?;
//! let sink = build_sink(options.sink, &config, Arc::clone(&http))?;
//! let mut monitor = build_monitor(&config, policy, http, sink);
//! monitor.run(&cancel).await;
//! ```

pub mod config;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::adapters::{ApiContentFetcher, ConsoleSink, ReqwestHttpClient, WebhookSink};
use crate::error::MonitorResult;
use crate::monitor::Monitor;
use crate::policy::WatchPolicy;
use crate::router::EventRouter;
use crate::stream::StreamClient;
use crate::traits::{HttpClient, NotificationSink};

pub use config::{notify_endpoint, MonitorConfig, TOKEN_ENV};

/// Where notifications go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkKind {
    #[default]
    Console,
    Webhook,
}

impl SinkKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "console" | "stdout" => Some(SinkKind::Console),
            "webhook" | "slack" => Some(SinkKind::Webhook),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SinkKind::Console => "console",
            SinkKind::Webhook => "webhook",
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Load and validate both startup files. Any failure here is fatal.
pub fn load_startup(config_path: &Path, watch_path: &Path) -> MonitorResult<(MonitorConfig, WatchPolicy)> {
    let config = MonitorConfig::load(config_path)?;
    let policy = WatchPolicy::load(watch_path)?;
    Ok((config, policy))
}

/// Shared HTTP client for the stream, the fetcher and the webhook sink.
pub fn build_http_client(config: &MonitorConfig) -> MonitorResult<Arc<dyn HttpClient>> {
    Ok(Arc::new(ReqwestHttpClient::new(config.tls_policy())?))
}

/// Build the selected sink.
pub fn build_sink(
    kind: SinkKind,
    config: &MonitorConfig,
    http: Arc<dyn HttpClient>,
) -> MonitorResult<Arc<dyn NotificationSink>> {
    let sink: Arc<dyn NotificationSink> = match kind {
        SinkKind::Console => Arc::new(ConsoleSink::stdout()),
        SinkKind::Webhook => Arc::new(WebhookSink::new(http, config.webhook_url()?)),
    };
    Ok(sink)
}

/// Assemble the stream client, fetcher and router into a [`Monitor`].
pub fn build_monitor(
    config: &MonitorConfig,
    policy: WatchPolicy,
    http: Arc<dyn HttpClient>,
    sink: Arc<dyn NotificationSink>,
) -> Monitor {
    let headers = config.request_headers();
    let fetcher = ApiContentFetcher::new(Arc::clone(&http), config.base_url(), headers.clone())
        .with_timeout(config.fetch_timeout());
    let router = EventRouter::new(Arc::new(policy), Arc::new(fetcher), sink)
        .with_tail_lines(config.monitor.tail_lines)
        .with_max_fetch_bytes(config.monitor.max_fetch_bytes);
    let stream = StreamClient::new(http, config.notify_endpoint(), headers);
    Monitor::new(stream, router, config.backoff())
}
