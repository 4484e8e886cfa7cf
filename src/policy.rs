//! Watch-list policy: which events are notification-worthy.
//!
//! Loaded once at startup from a YAML file of the form
//!
//! ```yaml
//! EVENTS:
//!   - child_file_added
//!   - child_dir_added
//! EXTENSIONS: [".csv", ".log"]
//! PATHS:
//!   - /proj/out/
//! ```
//!
//! and shared read-only by the router afterwards.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::ChangeEventType;

/// Raw shape of the watch-list file.
#[derive(Debug, Default, Deserialize)]
struct WatchListFile {
    #[serde(rename = "EVENTS", default)]
    events: Option<Vec<String>>,
    #[serde(rename = "EXTENSIONS", default)]
    extensions: Option<Vec<String>>,
    #[serde(rename = "PATHS", default)]
    paths: Option<Vec<String>>,
}

/// Normalized, immutable watch policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchPolicy {
    event_types: HashSet<String>,
    extensions: HashSet<String>,
    path_prefixes: Vec<String>,
}

impl WatchPolicy {
    /// Build a policy, normalizing every entry.
    ///
    /// Fails with [`ConfigError::NoWatchedEvents`] when no event type
    /// survives normalization. Empty extension or path lists are legal and
    /// simply never match.
    pub fn new<E, X, P>(event_types: E, extensions: X, path_prefixes: P) -> Result<Self, ConfigError>
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        X: IntoIterator,
        X::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let event_types: HashSet<String> = event_types
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if event_types.is_empty() {
            return Err(ConfigError::NoWatchedEvents);
        }

        let extensions = extensions
            .into_iter()
            .filter_map(|e| normalize_extension(e.as_ref()))
            .collect();

        let mut prefixes: Vec<String> = Vec::new();
        for prefix in path_prefixes
            .into_iter()
            .filter_map(|p| normalize_prefix(p.as_ref()))
        {
            if !prefixes.contains(&prefix) {
                prefixes.push(prefix);
            }
        }

        Ok(Self {
            event_types,
            extensions,
            path_prefixes: prefixes,
        })
    }

    /// Parse a policy from watch-list YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty map
        let file: WatchListFile = if yaml.trim().is_empty() {
            WatchListFile::default()
        } else {
            serde_yaml::from_str(yaml)?
        };

        Self::new(
            file.events.unwrap_or_default(),
            file.extensions.unwrap_or_default(),
            file.paths.unwrap_or_default(),
        )
    }

    /// Load a policy from a watch-list YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let policy = Self::from_yaml_str(&contents)?;
        tracing::debug!(
            "Loaded watch list from {}: {} event types, {} extensions, {} paths",
            path.display(),
            policy.event_types.len(),
            policy.extensions.len(),
            policy.path_prefixes.len()
        );
        Ok(policy)
    }

    pub fn watches_event(&self, event_type: &ChangeEventType) -> bool {
        self.event_types.contains(event_type.as_str())
    }

    /// `extension` must already be lowercased with its leading dot.
    pub fn watches_extension(&self, extension: &str) -> bool {
        self.extensions.contains(extension)
    }

    /// True if `directory` equals a watched prefix or lies beneath one.
    ///
    /// Matching stops at segment boundaries: `/a/b` covers `/a/b/c` but not
    /// `/a/bc`.
    pub fn watches_directory(&self, directory: &str) -> bool {
        self.path_prefixes
            .iter()
            .any(|prefix| is_within(directory, prefix))
    }

    pub fn event_types(&self) -> &HashSet<String> {
        &self.event_types
    }

    pub fn extensions(&self) -> &HashSet<String> {
        &self.extensions
    }

    pub fn path_prefixes(&self) -> &[String] {
        &self.path_prefixes
    }
}

fn normalize_extension(raw: &str) -> Option<String> {
    let ext = raw.trim().to_lowercase();
    if ext.is_empty() {
        None
    } else if ext.starts_with('.') {
        Some(ext)
    } else {
        Some(format!(".{}", ext))
    }
}

/// Trailing separators are stripped and a leading one is added, so the
/// root `/` becomes the empty prefix.
fn normalize_prefix(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() || trimmed.starts_with('/') {
        Some(trimmed.to_string())
    } else {
        Some(format!("/{}", trimmed))
    }
}

fn is_within(directory: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }
    match directory.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
