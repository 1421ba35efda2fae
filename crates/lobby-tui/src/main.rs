//! Lobby TUI entry point.

use std::{fs::File, path::PathBuf, sync::Mutex, time::Duration};

use clap::Parser;
use lobby_core::ContainerConfig;
use lobby_tui::{Runtime, RuntimeConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Multiplayer lobby browser over a simulated room feed
#[derive(Parser, Debug)]
#[command(name = "lobby-tui")]
#[command(about = "Browse, search and join rooms in a simulated multiplayer lobby")]
#[command(version)]
struct Args {
    /// Rooms open at start
    #[arg(long, default_value = "24")]
    rooms: usize,

    /// Seed for the simulated lobby (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Quiet period before a search is applied, in milliseconds
    #[arg(long, default_value = "200")]
    debounce_ms: u64,

    /// Interval between lobby changes, in milliseconds
    #[arg(long, default_value = "1500")]
    churn_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write logs to this file. The terminal is taken by the UI, so without
    /// a file nothing is logged.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = File::create(path)?;
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
            .with(filter)
            .init();
    }

    let config = RuntimeConfig {
        rooms: args.rooms,
        seed: args.seed.unwrap_or_else(rand::random),
        container: ContainerConfig { filter_debounce: Duration::from_millis(args.debounce_ms) },
        churn: Duration::from_millis(args.churn_ms.max(1)),
        ..RuntimeConfig::default()
    };

    let runtime = Runtime::new(config)?;
    Ok(runtime.run().await?)
}
