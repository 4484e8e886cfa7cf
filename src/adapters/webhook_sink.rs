//! Sink posting notifications to a chat webhook.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use crate::models::{NotificationKind, NotificationPayload};
use crate::traits::{Headers, HttpClient, NotificationSink, SinkError};

#[derive(Serialize)]
struct WebhookMessage<'a> {
    text: &'a str,
}

/// Render a notification as chat markdown, snippet in a code block.
pub fn render(payload: &NotificationPayload) -> String {
    let headline = payload.headline();
    match payload.kind {
        NotificationKind::NewDirectory => format!("{}\n", headline),
        NotificationKind::NewFile => format!(
            "{}\n```{}```",
            headline,
            payload.snippet.as_deref().unwrap_or_default()
        ),
    }
}

/// POSTs `{"text": ...}` to an incoming-webhook URL.
pub struct WebhookSink {
    http: Arc<dyn HttpClient>,
    url: String,
    headers: Headers,
}

impl WebhookSink {
    pub fn new(http: Arc<dyn HttpClient>, url: impl Into<String>) -> Self {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            http,
            url: url.into(),
            headers,
        }
    }
}

#[async_trait]
impl NotificationSink for WebhookSink {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn deliver(&self, payload: &NotificationPayload) -> Result<(), SinkError> {
        let text = render(payload);
        let body = serde_json::to_string(&WebhookMessage { text: &text })
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        let response = self.http.post(&self.url, &body, &self.headers).await?;
        if !response.is_ok() {
            let body = response.text_lossy();
            tracing::error!("[webhook] error {}: {}", response.status, body);
            return Err(SinkError::Rejected {
                status: response.status,
                body,
            });
        }

        tracing::debug!("[webhook] delivered {} notification", payload.kind);
        Ok(())
    }
}
