// SPDX-License-Identifier: MIT

//! plugd - plugin loading daemon
//!
//! Parses the bootstrap configuration file, loads the plugins it names
//! into the registry, then sits in the foreground until told to stop.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use plugd_config::ConfigFile;
use plugd_daemon::Registry;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{info, warn};

const DEFAULT_CONFIG_FILE: &str = "/etc/plugd/plugd.conf";

#[derive(Parser, Debug)]
#[command(name = "plugd", version, about = "Modular plugin-loading daemon")]
struct Cli {
    /// Bootstrap configuration file
    #[arg(short = 'C', long = "config-file", default_value = DEFAULT_CONFIG_FILE)]
    config_file: PathBuf,

    /// Log filter directive, e.g. "debug" or "plugd_config=trace"
    #[arg(short = 'l', long = "log-level")]
    log_level: Option<String>,

    /// Increase log verbosity (repeat for more)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Parse the configuration and print the action tree, without
    /// loading anything
    #[arg(long)]
    check: bool,

    /// Stay in the foreground
    #[arg(short = 'f', long)]
    foreground: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli)?;

    let config = ConfigFile::parse_path(&cli.config_file)?;

    if cli.check {
        let tree = serde_json::to_string_pretty(config.actions())
            .context("failed to render action tree")?;
        println!("{tree}");
        return Ok(());
    }

    let mut registry = Registry::with_builtins();
    config.execute(&mut registry)?;
    info!(
        config = %config.file(),
        plugins = registry.loaded().len(),
        "bootstrap complete"
    );

    if !cli.foreground {
        // Detaching is not supported; run as if -f was given so a
        // supervisor keeps ownership of the process.
        warn!("daemonizing is not supported, staying in the foreground");
    }

    // Readiness marker for supervisors and tests.
    println!("READY");
    wait_for_shutdown().await
}

/// Block until SIGTERM or SIGINT arrives.
async fn wait_for_shutdown() -> Result<()> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    tokio::select! {
        _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        _ = sigint.recv() => info!("received SIGINT, shutting down"),
    }
    Ok(())
}

/// Install the tracing subscriber.
///
/// Precedence: `-l` directive, then `-v` count, then `RUST_LOG`, then
/// "info". Output goes to stderr; stdout is reserved for `--check` and
/// the readiness marker.
fn setup_logging(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if let Some(directive) = &cli.log_level {
        EnvFilter::try_new(directive).context("invalid log level")?
    } else {
        match cli.verbose {
            0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
