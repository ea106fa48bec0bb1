//! PortPulse CLI - Watch local development ports
//!
//! A command-line tool that probes local TCP ports, reports whether each
//! is free or busy, and names the process holding busy ones.

mod commands;
mod term;

use std::time::Duration;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use portpulse_core::config::{
    self, parse_port, DASHBOARD_INTERVAL_SECS, DEFAULT_PORTS, MONITOR_INTERVAL_SECS,
    WATCH_INTERVAL_SECS,
};
use portpulse_core::Settings;

#[derive(Parser, Debug)]
#[command(name = "portpulse")]
#[command(author, version, about = "Watch which local development ports are in use")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Diagnostic logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Continuously monitor ports and highlight changes
    #[command(alias = "monitor")]
    Start {
        /// Ports to monitor (default: common development ports)
        #[arg(value_parser = parse_port)]
        ports: Vec<u16>,

        /// Refresh interval in seconds
        #[arg(short, long, default_value_t = MONITOR_INTERVAL_SECS, value_parser = clap::value_parser!(u64).range(1..))]
        interval: u64,
    },

    /// Refreshing table of the first 20 default ports
    Dashboard {
        /// Refresh interval in seconds
        #[arg(short, long, default_value_t = DASHBOARD_INTERVAL_SECS, value_parser = clap::value_parser!(u64).range(1..))]
        interval: u64,
    },

    /// Print a line whenever a single port changes state
    Watch {
        /// Port to watch
        #[arg(value_parser = parse_port)]
        port: u16,

        /// Refresh interval in seconds
        #[arg(short, long, default_value_t = WATCH_INTERVAL_SECS, value_parser = clap::value_parser!(u64).range(1..))]
        interval: u64,
    },

    /// Check ports once and exit
    Status {
        /// Ports to check (default: first 10 development ports)
        #[arg(value_parser = parse_port)]
        ports: Vec<u16>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    if !atty::is(atty::Stream::Stdout) {
        crossterm::style::force_color_output(false);
    }

    let settings = Settings::default();

    match cli.command {
        Commands::Start { ports, interval } => {
            let ports = if ports.is_empty() {
                DEFAULT_PORTS.to_vec()
            } else {
                ports
            };
            commands::monitor::run(ports, Duration::from_secs(interval), settings).await?;
        }
        Commands::Dashboard { interval } => {
            commands::dashboard::run(&DEFAULT_PORTS, Duration::from_secs(interval), settings)
                .await?;
        }
        Commands::Watch { port, interval } => {
            commands::watch::run(port, Duration::from_secs(interval), settings).await?;
        }
        Commands::Status { ports } => {
            let ports = if ports.is_empty() {
                config::status_default_ports()
            } else {
                ports
            };
            commands::status::run(ports, settings).await?;
        }
    }

    Ok(())
}

/// Log to stderr so stdout only carries the report.
///
/// The level comes from `-v` alone; `RUST_LOG` is deliberately ignored.
fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}
