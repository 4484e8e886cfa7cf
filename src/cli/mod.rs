//! CLI module for cluster-notify.
//!
//! Argument parsing and the informational commands (`--version`,
//! `--help`). Anything else resolves to [`CliCommand::Run`], which `main`
//! hands to the startup wiring.

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, CliError, RunOptions};
pub use version::{version_line, VERSION};

/// Usage text printed by `--help`.
pub const USAGE: &str = "\
Usage: cluster-notify [OPTIONS]

Watch a cluster's filesystem change stream and relay matching events.

Options:
  -c, --config <PATH>   Monitor configuration (default: cn_monitor.toml)
  -w, --watch <PATH>    Watch list (default: watched_items.yml)
  -s, --sink <SINK>     console | webhook (default: console)
  -v, --verbose         Log at debug level unless RUST_LOG is set
  -V, --version         Print version and exit
  -h, --help            Print this help and exit

Environment:
  CLUSTER_NOTIFY_TOKEN  Overrides cluster.token from the configuration
  RUST_LOG              Log filter (default: info)
";

/// Text for an informational command, or `None` for a run.
pub fn info_text(command: &CliCommand) -> Option<String> {
    match command {
        CliCommand::Version => Some(version_line()),
        CliCommand::Help => Some(USAGE.to_string()),
        CliCommand::Run(_) => None,
    }
}
