//! Points Command Line Interface
//!
//! Configuration is loaded from environment variables (via .env file).
//! Command-line arguments override environment variables.
//!
//! Usage:
//!   points serve          - Start the points API server
//!   points score <file>   - Score a receipt JSON file without storing it

use clap::{Parser, Subcommand};
use points_core::logging::init_logging;
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use config::{ServeArgs, ServeConfig};
use error::CliResult;

#[derive(Parser)]
#[command(name = "points")]
#[command(about = "Receipt points scoring service")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "POINTS_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log format (pretty, json, compact)
    #[arg(long, global = true, env = "POINTS_LOG_FORMAT", default_value = "pretty")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve(ServeArgs),

    /// Score a receipt file and print the per-rule breakdown
    Score {
        /// Receipt JSON file
        file: PathBuf,
        /// Print the breakdown as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let log_config = config::log_config(&cli.log_level, &cli.log_format)?;
    init_logging(&log_config)?;

    match cli.command {
        Commands::Serve(args) => {
            let config = ServeConfig::from_env()?.apply(&args)?;
            commands::serve(config).await
        }
        Commands::Score { file, json } => commands::score(&file, json),
    }
}
