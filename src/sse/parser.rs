//! Line splitting, classification and batch decoding.

use crate::models::ChangeEvent;
use crate::sse::events::{DecodeError, SseLine};

/// Prefix marking a line that carries an event batch
pub const DATA_MARKER: &str = "data:";

/// Classify a single line of the stream body.
///
/// Surrounding whitespace is ignored, so ` data: [...]` still carries a
/// payload.
pub fn parse_sse_line(line: &str) -> SseLine {
    let line = line.trim();
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(rest) = line.strip_prefix(DATA_MARKER) {
        return SseLine::Data(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    // Unknown line format - treat as comment
    SseLine::Comment(line.to_string())
}

/// Decode a `data:` payload into its batch of change events.
///
/// The whole payload must be a JSON array of event objects; a single bad
/// element rejects the batch.
pub fn decode_batch(payload: &str) -> Result<Vec<ChangeEvent>, DecodeError> {
    serde_json::from_str(payload).map_err(|e| DecodeError::new(payload, e.to_string()))
}

/// Longest unterminated line the buffer holds before the stream is
/// treated as broken.
pub const MAX_LINE_BYTES: usize = 8 * 1024 * 1024;

/// Accumulates raw body chunks and hands out complete lines.
///
/// Splitting happens on bytes so a multi-byte character cut across two
/// chunks is reassembled before it is decoded. Each byte is scanned for a
/// newline once, however many chunks a line arrives in.
#[derive(Debug)]
pub struct LineBuffer {
    pending: Vec<u8>,
    /// Start of the first line not yet handed out
    start: usize,
    /// `pending[start..scanned]` holds no newline
    scanned: usize,
    max_line_bytes: usize,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::with_max_line_bytes(MAX_LINE_BYTES)
    }
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_line_bytes(max_line_bytes: usize) -> Self {
        Self {
            pending: Vec::new(),
            start: 0,
            scanned: 0,
            max_line_bytes,
        }
    }

    pub fn max_line_bytes(&self) -> usize {
        self.max_line_bytes
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
    }

    /// Next newline-terminated line, without its terminator (`\n` or `\r\n`).
    pub fn next_line(&mut self) -> Option<String> {
        match self.pending[self.scanned..].iter().position(|&b| b == b'\n') {
            Some(offset) => {
                let newline = self.scanned + offset;
                let mut line = &self.pending[self.start..newline];
                if line.last() == Some(&b'\r') {
                    line = &line[..line.len() - 1];
                }
                let text = String::from_utf8_lossy(line).into_owned();
                self.start = newline + 1;
                self.scanned = self.start;
                Some(text)
            }
            None => {
                // Compact once per exhausted batch of lines
                self.pending.drain(..self.start);
                self.start = 0;
                self.scanned = self.pending.len();
                None
            }
        }
    }

    /// True once the unterminated fragment is longer than the line limit.
    pub fn is_overflowing(&self) -> bool {
        self.pending.len() - self.start > self.max_line_bytes
    }

    /// Drain whatever unterminated fragment is left once the body closes.
    pub fn finish(&mut self) -> Option<String> {
        if self.is_empty() {
            self.clear();
            return None;
        }
        let rest = String::from_utf8_lossy(&self.pending[self.start..])
            .trim_end_matches('\r')
            .to_string();
        self.clear();
        Some(rest)
    }

    /// Forget any buffered bytes, keeping the line limit.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.start = 0;
        self.scanned = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.pending.len() == self.start
    }
}
