//! Sink that prints notifications to standard output.

use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;

use crate::models::{NotificationKind, NotificationPayload};
use crate::traits::{NotificationSink, SinkError};

/// Render a notification the way the console shows it.
///
/// File notifications frame the snippet between dashed rules as wide as its
/// longest line.
pub fn render(payload: &NotificationPayload) -> String {
    let headline = payload.headline();
    match payload.kind {
        NotificationKind::NewDirectory => format!("{}\n", headline),
        NotificationKind::NewFile => {
            let snippet = payload.snippet.as_deref().unwrap_or_default();
            let width = snippet
                .lines()
                .map(|line| line.chars().count())
                .max()
                .unwrap_or(0);
            let rule = "-".repeat(width);
            format!("{}\n\n{}\n{}\n{}", headline, rule, snippet, rule)
        }
    }
}

/// Prints each notification followed by a newline.
pub struct ConsoleSink {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

#[async_trait]
impl NotificationSink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    async fn deliver(&self, payload: &NotificationPayload) -> Result<(), SinkError> {
        let text = render(payload);
        let mut out = self
            .out
            .lock()
            .map_err(|_| std::io::Error::other("console writer poisoned"))?;
        writeln!(out, "{}", text)?;
        out.flush()?;
        Ok(())
    }
}
