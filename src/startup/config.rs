//! Monitor configuration loaded from TOML.
//!
//! ```toml
//! [cluster]
//! address = "cluster.example.com"
//! token = "..."
//! use_ssl = true
//!
//! [webhook]
//! url = "https://hooks.example.com/services/..."
//!
//! [monitor]
//! reconnect_delay_secs = 5
//! backoff = "fixed"
//! max_backoff_secs = 300
//! tail_lines = 10
//! max_fetch_bytes = 20000
//! fetch_timeout_secs = 30
//! ```
//!
//! The access token may instead come from `CLUSTER_NOTIFY_TOKEN`, which
//! wins over the file.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::adapters::api_fetcher::DEFAULT_FETCH_TIMEOUT;
use crate::error::ConfigError;
use crate::monitor::{BackoffStrategy, ReconnectBackoff};
use crate::router::{DEFAULT_MAX_FETCH_BYTES, DEFAULT_TAIL_LINES};
use crate::traits::{Headers, TlsPolicy};

/// Environment variable overriding `cluster.token`.
pub const TOKEN_ENV: &str = "CLUSTER_NOTIFY_TOKEN";

/// Path of the recursive change-notification stream under the API root.
const NOTIFY_PATH: &str = "/api/v1/files/%2F/notify?recursive=true";

/// Build the notification endpoint for a cluster base URL.
pub fn notify_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), NOTIFY_PATH)
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ClusterSettings {
    /// `host` or `host:port`, no scheme
    pub address: String,
    pub token: String,
    /// When false, server certificates are not verified
    pub use_ssl: bool,
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            address: String::new(),
            token: String::new(),
            use_ssl: true,
        }
    }
}

impl fmt::Debug for ClusterSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterSettings")
            .field("address", &self.address)
            .field("token", &"<redacted>")
            .field("use_ssl", &self.use_ssl)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WebhookSettings {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    pub reconnect_delay_secs: u64,
    pub backoff: BackoffStrategy,
    pub max_backoff_secs: u64,
    pub tail_lines: usize,
    pub max_fetch_bytes: usize,
    /// Bound on one content fetch; the notification stream has none
    pub fetch_timeout_secs: u64,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            reconnect_delay_secs: 5,
            backoff: BackoffStrategy::Fixed,
            max_backoff_secs: 300,
            tail_lines: DEFAULT_TAIL_LINES,
            max_fetch_bytes: DEFAULT_MAX_FETCH_BYTES,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT.as_secs(),
        }
    }
}

/// Immutable settings built once at startup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub cluster: ClusterSettings,
    pub webhook: WebhookSettings,
    pub monitor: MonitorSettings,
}

impl MonitorConfig {
    /// Parse without validating.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Read, apply the environment override, and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
            self.cluster.token = token;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let address = self.cluster.address.trim();
        if address.is_empty() {
            return Err(ConfigError::Missing("cluster.address"));
        }
        if address.contains("://") || address.contains('/') {
            return Err(ConfigError::Invalid {
                field: "cluster.address",
                message: format!("expected host[:port], got `{}`", address),
            });
        }
        if self.cluster.token.trim().is_empty() {
            return Err(ConfigError::Missing("cluster.token"));
        }
        if self.monitor.tail_lines == 0 {
            return Err(ConfigError::Invalid {
                field: "monitor.tail_lines",
                message: "must be at least 1".to_string(),
            });
        }
        if self.monitor.max_fetch_bytes == 0 {
            return Err(ConfigError::Invalid {
                field: "monitor.max_fetch_bytes",
                message: "must be at least 1".to_string(),
            });
        }
        if self.monitor.fetch_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "monitor.fetch_timeout_secs",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// `https://<address>`
    pub fn base_url(&self) -> String {
        format!("https://{}", self.cluster.address.trim())
    }

    pub fn notify_endpoint(&self) -> String {
        notify_endpoint(&self.base_url())
    }

    /// Headers sent on every cluster API request.
    pub fn request_headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.cluster.token.trim()),
        );
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    }

    pub fn tls_policy(&self) -> TlsPolicy {
        if self.cluster.use_ssl {
            TlsPolicy::Verify
        } else {
            TlsPolicy::SkipVerify
        }
    }

    /// Webhook URL, required only when the webhook sink is selected.
    pub fn webhook_url(&self) -> Result<&str, ConfigError> {
        self.webhook
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing("webhook.url"))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.monitor.fetch_timeout_secs)
    }

    pub fn backoff(&self) -> ReconnectBackoff {
        ReconnectBackoff::with_strategy(
            self.monitor.backoff,
            Duration::from_secs(self.monitor.reconnect_delay_secs),
            Duration::from_secs(self.monitor.max_backoff_secs),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[cluster]
address = "cluster.example.com:8000"
token = "secret"
"#;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::from_toml_str(MINIMAL).unwrap();
        config.validate().unwrap();
        assert!(config.cluster.use_ssl);
        assert_eq!(config.monitor.reconnect_delay_secs, 5);
        assert_eq!(config.monitor.backoff, BackoffStrategy::Fixed);
        assert_eq!(config.monitor.tail_lines, 10);
        assert_eq!(config.monitor.max_fetch_bytes, 20_000);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
        assert_eq!(config.tls_policy(), TlsPolicy::Verify);
    }

    #[test]
    fn test_endpoint_and_headers() {
        let config = MonitorConfig::from_toml_str(MINIMAL).unwrap();
        assert_eq!(
            config.notify_endpoint(),
            "https://cluster.example.com:8000/api/v1/files/%2F/notify?recursive=true"
        );
        let headers = config.request_headers();
        assert_eq!(headers.get("Authorization").unwrap(), "Bearer secret");
        assert_eq!(headers.get("Accept").unwrap(), "application/json");
        assert_eq!(headers.get("Content-Type").unwrap(), "application/json");
    }

    #[test]
    fn test_notify_endpoint_trims_slash() {
        assert_eq!(
            notify_endpoint("http://127.0.0.1:9/"),
            "http://127.0.0.1:9/api/v1/files/%2F/notify?recursive=true"
        );
    }

    #[test]
    fn test_env_token_overrides_file() {
        let config = MonitorConfig::from_toml_str(MINIMAL)
            .unwrap()
            .apply_env(|key| (key == TOKEN_ENV).then(|| "from-env".to_string()));
        assert_eq!(config.cluster.token, "from-env");

        let config = MonitorConfig::from_toml_str(MINIMAL)
            .unwrap()
            .apply_env(|_| Some("  ".to_string()));
        assert_eq!(config.cluster.token, "secret");
    }

    #[test]
    fn test_missing_address_and_token() {
        let config = MonitorConfig::from_toml_str("[cluster]\ntoken = \"t\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing("cluster.address"))
        ));

        let config = MonitorConfig::from_toml_str("[cluster]\naddress = \"h\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing("cluster.token"))
        ));
    }

    #[test]
    fn test_address_with_scheme_is_invalid() {
        let config = MonitorConfig::from_toml_str(
            "[cluster]\naddress = \"https://h\"\ntoken = \"t\"\n",
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "cluster.address",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_tail_lines_is_invalid() {
        let config = MonitorConfig::from_toml_str(&format!(
            "{}\n[monitor]\ntail_lines = 0\n",
            MINIMAL
        ))
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "monitor.tail_lines",
                ..
            })
        ));
    }

    #[test]
    fn test_fetch_timeout() {
        let config = MonitorConfig::from_toml_str(&format!(
            "{}\n[monitor]\nfetch_timeout_secs = 4\n",
            MINIMAL
        ))
        .unwrap();
        assert_eq!(config.fetch_timeout(), Duration::from_secs(4));

        let config = MonitorConfig::from_toml_str(&format!(
            "{}\n[monitor]\nfetch_timeout_secs = 0\n",
            MINIMAL
        ))
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "monitor.fetch_timeout_secs",
                ..
            })
        ));
    }

    #[test]
    fn test_skip_verify_and_exponential_backoff() {
        let config = MonitorConfig::from_toml_str(&format!(
            "{}use_ssl = false\n[monitor]\nbackoff = \"exponential\"\nreconnect_delay_secs = 2\nmax_backoff_secs = 8\n",
            MINIMAL
        ))
        .unwrap();
        assert_eq!(config.tls_policy(), TlsPolicy::SkipVerify);

        let mut backoff = config.backoff();
        let delays: Vec<u64> = (0..4).map(|_| backoff.next_delay().as_secs()).collect();
        assert_eq!(delays, vec![2, 4, 8, 8]);
    }

    #[test]
    fn test_webhook_url_required_only_on_demand() {
        let config = MonitorConfig::from_toml_str(MINIMAL).unwrap();
        assert!(matches!(
            config.webhook_url(),
            Err(ConfigError::Missing("webhook.url"))
        ));

        let config = MonitorConfig::from_toml_str(&format!(
            "{}\n[webhook]\nurl = \"https://hooks.example.com/x\"\n",
            MINIMAL
        ))
        .unwrap();
        assert_eq!(config.webhook_url().unwrap(), "https://hooks.example.com/x");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = MonitorConfig::from_toml_str(MINIMAL).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_unknown_backoff_is_rejected() {
        let result = MonitorConfig::from_toml_str("[monitor]\nbackoff = \"random\"\n");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }
}
