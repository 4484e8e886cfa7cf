//! Common test utilities for integration tests.
//!
//! Fixtures for building change events, stream lines and policies, plus
//! the mocks re-exported from `cluster_notify::adapters::mock`.
//!
//! # Example
//!
//! ```ignore
//! use common::{data_line, file_added, watch_policy};
//!
//! let line = data_line(&[file_added("proj/out/report.csv", &["f1", "f42"])]);
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use cluster_notify::models::ChangeEvent;
use cluster_notify::policy::WatchPolicy;

/// Notification endpoint used with the mock HTTP client.
pub const NOTIFY_URL: &str = "https://cluster.test/api/v1/files/%2F/notify?recursive=true";

/// Base URL matching [`NOTIFY_URL`].
pub const BASE_URL: &str = "https://cluster.test";

fn spine(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

pub fn file_added(path: &str, ids: &[&str]) -> ChangeEvent {
    ChangeEvent::new("child_file_added", path, spine(ids))
}

pub fn data_written(path: &str, ids: &[&str]) -> ChangeEvent {
    ChangeEvent::new("child_data_written", path, spine(ids))
}

pub fn dir_added(path: &str, ids: &[&str]) -> ChangeEvent {
    ChangeEvent::new("child_dir_added", path, spine(ids))
}

/// A `data:` line carrying `events` as one batch, newline-terminated.
pub fn data_line(events: &[ChangeEvent]) -> String {
    format!(
        "data: {}\n",
        serde_json::to_string(events).expect("events serialize")
    )
}

/// Policy watching every event type the router acts on.
pub fn watch_policy(extensions: &[&str], paths: &[&str]) -> WatchPolicy {
    WatchPolicy::new(
        ["child_file_added", "child_data_written", "child_dir_added"],
        extensions.iter().copied(),
        paths.iter().copied(),
    )
    .expect("valid policy")
}

/// `line 1\nline 2\n...` with `n` lines and a trailing newline.
pub fn numbered_lines(n: usize) -> String {
    (1..=n).map(|i| format!("line {}\n", i)).collect()
}

/// Base URL of a local port with nothing listening on it.
///
/// A dropped wiremock `MockServer` goes back to a pool and keeps
/// answering, so refused connections need a port of our own.
pub fn unused_local_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("listener address").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
