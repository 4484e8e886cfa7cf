//! Command-line argument parsing for cluster-notify.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use std::path::PathBuf;

use thiserror::Error;

use crate::startup::SinkKind;

/// Default monitor configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "cn_monitor.toml";

/// Default watch-list file.
pub const DEFAULT_WATCH_PATH: &str = "watched_items.yml";

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the monitor (default)
    Run(RunOptions),
}

/// Options for a monitor run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub config_path: PathBuf,
    pub watch_path: PathBuf,
    pub sink: SinkKind,
    /// Raise the default log level to debug
    pub verbose: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            watch_path: PathBuf::from(DEFAULT_WATCH_PATH),
            sink: SinkKind::Console,
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    #[error("option `{0}` requires a value")]
    MissingValue(&'static str),

    #[error("unknown sink `{0}` (expected `console` or `webhook`)")]
    UnknownSink(String),

    #[error("unrecognized argument `{0}`")]
    UnknownArgument(String),
}

/// Parse command-line arguments and return the appropriate command.
///
/// `--version` and `--help` win wherever they appear. Values may be given
/// as `--config path` or `--config=path`.
///
/// # Examples
///
/// ```
/// use cluster_notify::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["cluster-notify".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, CliError>
where
    I: Iterator<Item = String>,
{
    let mut options = RunOptions::default();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };

        match flag.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--verbose" | "-v" => options.verbose = true,
            "--config" | "-c" => {
                options.config_path = PathBuf::from(value_for("--config", inline, &mut args)?);
            }
            "--watch" | "-w" => {
                options.watch_path = PathBuf::from(value_for("--watch", inline, &mut args)?);
            }
            "--sink" | "-s" => {
                let name = value_for("--sink", inline, &mut args)?;
                options.sink = SinkKind::from_name(&name).ok_or(CliError::UnknownSink(name))?;
            }
            _ => return Err(CliError::UnknownArgument(arg)),
        }
    }

    Ok(CliCommand::Run(options))
}

fn value_for<I>(flag: &'static str, inline: Option<String>, rest: &mut I) -> Result<String, CliError>
where
    I: Iterator<Item = String>,
{
    inline
        .or_else(|| rest.next())
        .filter(|v| !v.is_empty())
        .ok_or(CliError::MissingValue(flag))
}
