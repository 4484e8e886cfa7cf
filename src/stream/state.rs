use std::fmt;

/// Lifecycle of the single notification-stream connection.
///
/// `Disconnected → Connecting → Streaming → Disconnected`, until a
/// cancellation moves any state to `Cancelled` for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No open body: not yet connected, closed by the server, or lost
    #[default]
    Disconnected,
    /// Handshake in flight
    Connecting,
    /// Handshake answered 200 and the body is being read
    Streaming,
    /// Shut down for good
    Cancelled,
}

impl ConnectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Streaming => "streaming",
            ConnectionState::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
