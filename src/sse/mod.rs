//! Framing for the change-notification stream.
//!
//! The body is plain text split on newlines:
//! - `data: <json array>` - a batch of zero or more change events
//! - `event: <type>` - event type line (ignored)
//! - Empty line - separator
//! - Anything else, including `:` comments - keep-alive noise
//!
//! # Module structure
//! - `events` - Line classification and the recoverable `DecodeError`
//! - `parser` - Line splitting, classification and batch decoding

mod events;
mod parser;

pub use events::{DecodeError, SseLine};
pub use parser::{decode_batch, parse_sse_line, LineBuffer, DATA_MARKER, MAX_LINE_BYTES};
