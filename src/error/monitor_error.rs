//! Unified error type for startup failures.
//!
//! Everything that can go wrong once the monitor is running is handled in
//! place (logged, retried or skipped). What remains are the failures that
//! stop the process before it starts watching.

use std::fmt;

use super::config::ConfigError;
use crate::traits::HttpError;

/// Unified error type for the monitor.
#[derive(Debug)]
pub enum MonitorError {
    /// Startup configuration errors.
    Config(ConfigError),

    /// The HTTP client could not be built.
    Http(HttpError),
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::Config(err) => write!(f, "Configuration error: {}", err),
            MonitorError::Http(err) => write!(f, "HTTP client error: {}", err),
        }
    }
}

impl std::error::Error for MonitorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MonitorError::Config(err) => Some(err),
            MonitorError::Http(err) => Some(err),
        }
    }
}

impl From<ConfigError> for MonitorError {
    fn from(err: ConfigError) -> Self {
        MonitorError::Config(err)
    }
}

impl From<HttpError> for MonitorError {
    fn from(err: HttpError) -> Self {
        MonitorError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_display_and_source() {
        let err: MonitorError = ConfigError::NoWatchedEvents.into();
        assert!(err.to_string().starts_with("Configuration error"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_http_display() {
        let err: MonitorError = HttpError::InvalidUrl("nope".to_string()).into();
        assert_eq!(err.to_string(), "HTTP client error: Invalid URL: nope");
    }
}
