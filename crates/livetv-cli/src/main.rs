//! LiveTV CLI - Player view diagnostics
//!
//! Features:
//! - Protocol resolution for stream URLs
//! - View lifecycle dry runs on the headless engine

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

/// LiveTV CLI - Player view diagnostics
#[derive(Parser)]
#[command(name = "livetv-cli")]
#[command(version)]
#[command(about = "Stream URL resolution and player view diagnostics", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the protocol hint and playback request for URLs
    Resolve {
        /// Stream URLs
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Open a view on the headless engine, report its state, then close it
    Open {
        /// Creation payload as JSON, e.g. '{"url": "https://host/live.m3u8"}'
        #[arg(short, long, default_value = "{}")]
        args: String,

        /// Engine configuration as JSON (missing fields use defaults)
        #[arg(short, long)]
        engine: Option<String>,

        /// Host view id
        #[arg(long, default_value = "1")]
        view_id: i64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    livetv_core::init();

    match cli.command {
        Commands::Resolve { urls } => {
            commands::resolve_urls(&urls, &cli.format)?;
        }
        Commands::Open { args, engine, view_id } => {
            commands::open(&args, engine.as_deref(), view_id, &cli.format)?;
        }
    }

    Ok(())
}
