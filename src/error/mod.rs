//! Unified error handling for the monitor.
//!
//! This module provides:
//!
//! - **Domain-specific Errors**: stream lifecycle and startup configuration
//! - **Unified Error Type**: `MonitorError` for failures that stop startup
//! - **Result Type Alias**: `MonitorResult<T>` for consistent return types
//!
//! # Handling
//!
//! | Failure | Type | Handling |
//! |---------|------|----------|
//! | connect or read failure, non-200 handshake | [`StreamError`] | reconnect after delay |
//! | malformed stream payload | [`crate::sse::DecodeError`] | log, keep reading |
//! | sink failure | [`crate::traits::SinkError`] | log, next event |
//! | bad startup config | [`MonitorError`] | exit |
//! | shutdown request | [`StreamError::Cancelled`] | exit cleanly |

mod config;
mod monitor_error;
mod stream;

pub use config::ConfigError;
pub use monitor_error::MonitorError;
pub use stream::StreamError;

/// Type alias for Results using [`MonitorError`].
pub type MonitorResult<T> = Result<T, MonitorError>;
