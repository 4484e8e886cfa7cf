//! Startup loading from real files on disk.

use std::fs;

use cluster_notify::adapters::MockHttpClient;
use cluster_notify::error::{ConfigError, MonitorError};
use cluster_notify::models::ChangeEventType;
use cluster_notify::startup::{build_monitor, build_sink, load_startup, SinkKind};
use cluster_notify::stream::ConnectionState;
use std::sync::Arc;
use tempfile::TempDir;

const CONFIG: &str = r#"
[cluster]
address = "cluster.example.com:8000"
token = "file-token"

[monitor]
reconnect_delay_secs = 2
backoff = "exponential"
tail_lines = 5
"#;

const WATCH_LIST: &str = r#"
EVENTS:
  - child_file_added
  - child_dir_added
EXTENSIONS: [".CSV", log]
PATHS:
  - /proj/out/
"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_startup_reads_both_files() {
    let dir = TempDir::new().unwrap();
    let config_path = write(&dir, "cn_monitor.toml", CONFIG);
    let watch_path = write(&dir, "watched_items.yml", WATCH_LIST);

    let (config, policy) = load_startup(&config_path, &watch_path).unwrap();

    assert_eq!(config.base_url(), "https://cluster.example.com:8000");
    assert_eq!(
        config.notify_endpoint(),
        "https://cluster.example.com:8000/api/v1/files/%2F/notify?recursive=true"
    );
    assert_eq!(config.monitor.tail_lines, 5);
    assert_eq!(config.monitor.max_fetch_bytes, 20_000);
    assert!(policy.watches_event(&ChangeEventType::FileAdded));
    assert!(!policy.watches_event(&ChangeEventType::DataWritten));
    assert!(policy.watches_extension(".csv"));
    assert!(policy.watches_extension(".log"));
    assert_eq!(policy.path_prefixes(), &["/proj/out".to_string()]);
}

#[test]
fn test_missing_config_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let watch_path = write(&dir, "watched_items.yml", WATCH_LIST);

    let err = load_startup(&dir.path().join("absent.toml"), &watch_path).unwrap_err();
    assert!(matches!(err, MonitorError::Config(ConfigError::Io { .. })));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_watch_list_without_events_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config_path = write(&dir, "cn_monitor.toml", CONFIG);
    let watch_path = write(&dir, "watched_items.yml", "EXTENSIONS: [.csv]\nPATHS: [/]\n");

    let err = load_startup(&config_path, &watch_path).unwrap_err();
    assert!(matches!(
        err,
        MonitorError::Config(ConfigError::NoWatchedEvents)
    ));
}

#[test]
fn test_config_without_address_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config_path = write(&dir, "cn_monitor.toml", "[cluster]\ntoken = \"t\"\n");
    let watch_path = write(&dir, "watched_items.yml", WATCH_LIST);

    let err = load_startup(&config_path, &watch_path).unwrap_err();
    assert!(matches!(
        err,
        MonitorError::Config(ConfigError::Missing("cluster.address"))
    ));
}

#[test]
fn test_unparseable_config_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config_path = write(&dir, "cn_monitor.toml", "[cluster\naddress = ");
    let watch_path = write(&dir, "watched_items.yml", WATCH_LIST);

    let err = load_startup(&config_path, &watch_path).unwrap_err();
    assert!(matches!(err, MonitorError::Config(ConfigError::Toml(_))));
}

#[test]
fn test_webhook_sink_requires_url() {
    let dir = TempDir::new().unwrap();
    let config_path = write(&dir, "cn_monitor.toml", CONFIG);
    let watch_path = write(&dir, "watched_items.yml", WATCH_LIST);
    let (config, _) = load_startup(&config_path, &watch_path).unwrap();

    let result = build_sink(SinkKind::Webhook, &config, Arc::new(MockHttpClient::new()));
    assert!(matches!(
        result,
        Err(MonitorError::Config(ConfigError::Missing("webhook.url")))
    ));
    assert!(build_sink(SinkKind::Console, &config, Arc::new(MockHttpClient::new())).is_ok());
}

#[test]
fn test_build_monitor_from_loaded_files() {
    let dir = TempDir::new().unwrap();
    let config_path = write(
        &dir,
        "cn_monitor.toml",
        &format!("{}\n[webhook]\nurl = \"https://hooks.example.com/x\"\n", CONFIG),
    );
    let watch_path = write(&dir, "watched_items.yml", WATCH_LIST);
    let (config, policy) = load_startup(&config_path, &watch_path).unwrap();

    let http = Arc::new(MockHttpClient::new());
    let sink = build_sink(SinkKind::Webhook, &config, http.clone()).unwrap();
    assert_eq!(sink.name(), "webhook");

    let monitor = build_monitor(&config, policy, http, sink);
    assert_eq!(monitor.stream().endpoint(), config.notify_endpoint());
    assert_eq!(monitor.stream().state(), ConnectionState::Disconnected);
}
