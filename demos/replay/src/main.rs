//! Replays a JSON-lines lobby transcript through hostrota and prints what
//! the bot would have sent to the game server.
//!
//! ```text
//! cargo run -p hostrota-replay -- demos/replay/sessions/rotation.jsonl \
//!     --config demos/replay/hostrota.toml
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hostrota::prelude::*;

/// Offline replay of a recorded hostrota lobby session.
#[derive(Parser)]
#[command(name = "hostrota-replay", version)]
struct Args {
    /// Transcript to replay, one JSON-encoded lobby event per line
    #[arg(value_name = "TRANSCRIPT")]
    transcript: PathBuf,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Print outbound requests as JSON instead of chat syntax
    #[arg(long)]
    json: bool,
}

/// Initialize structured logging with the configured level.
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(level) = args.log_level {
        config.log_level = level;
        hostrota::validate_config(&config)?;
    }
    init_logging(&config.log_level)?;

    let transcript = std::fs::read_to_string(&args.transcript)
        .with_context(|| format!("reading {}", args.transcript.display()))?;

    let report = replay(LobbySessionBuilder::from_config(&config), &JsonCodec, &transcript).await?;
    tracing::info!(
        events = report.events,
        outbound = report.outbound.len(),
        "replay finished"
    );

    for cmd in &report.outbound {
        if args.json {
            println!("{}", String::from_utf8(JsonCodec.encode(cmd)?)?);
        } else {
            println!("{cmd}");
        }
    }

    eprintln!("{}", serde_json::to_string_pretty(&report.status)?);
    Ok(())
}
