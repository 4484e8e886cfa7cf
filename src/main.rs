use cluster_notify::cli::{info_text, parse_args, CliCommand, RunOptions, USAGE};
use cluster_notify::startup::{build_http_client, build_monitor, build_sink, load_startup};

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},hyper=warn,reqwest=warn,rustls=warn"))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

/// Cancel `token` on the first Ctrl+C.
fn setup_interrupt_handler(token: CancellationToken) {
    // Install the handler - ignore errors if already set
    if let Err(e) = ctrlc::set_handler(move || token.cancel()) {
        tracing::warn!("Could not install Ctrl+C handler: {}", e);
    }
}

async fn run(options: RunOptions, cancel: CancellationToken) -> Result<()> {
    let (config, policy) = load_startup(&options.config_path, &options.watch_path)
        .wrap_err("Failed to load startup configuration")?;

    let http = build_http_client(&config).wrap_err("Failed to build HTTP client")?;
    let sink = build_sink(options.sink, &config, Arc::clone(&http))?;
    tracing::info!("Delivering notifications to the {} sink", sink.name());

    let mut monitor = build_monitor(&config, policy, http, sink);
    let stats = monitor.run(&cancel).await;
    tracing::debug!("Final stats: {:?}", stats);
    Ok(())
}

fn main() -> Result<()> {
    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    if let Some(text) = info_text(&command) {
        println!("{}", text);
        return Ok(());
    }

    let CliCommand::Run(options) = command else {
        return Ok(());
    };

    color_eyre::install()?;
    init_tracing(options.verbose);

    let cancel = CancellationToken::new();
    setup_interrupt_handler(cancel.clone());

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(options, cancel))
}
