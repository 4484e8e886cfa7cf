//! Startup configuration errors.
//!
//! All of these are fatal: they are raised before any connection is
//! attempted and terminate the process.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the monitor configuration or watch list.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid watch list: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("missing required setting `{0}`")]
    Missing(&'static str),

    #[error("invalid value for `{field}`: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },

    #[error("the watch list must define at least one EVENTS entry")]
    NoWatchedEvents,
}
