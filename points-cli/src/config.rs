//! Command configuration
//!
//! Server settings start from the environment (`ApiConfig::from_env`,
//! `StoreConfig::from_env`) and are then overridden by any flags given.

use clap::Args;
use points_api::ApiConfig;
use points_core::logging::{LogConfig, LogFormat, LogLevel};
use points_store::{StoreBackend, StoreConfig};
use std::path::PathBuf;

use crate::error::{CliError, CliResult};

/// Flags for `points serve`
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Store backend (memory, sled)
    #[arg(long)]
    pub store: Option<String>,

    /// Data directory for the sled backend
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Disable permissive CORS headers
    #[arg(long)]
    pub no_cors: bool,
}

/// Resolved server configuration
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub api: ApiConfig,
    pub store: StoreConfig,
}

impl ServeConfig {
    pub fn from_env() -> CliResult<Self> {
        Ok(Self {
            api: ApiConfig::from_env(),
            store: StoreConfig::from_env()?,
        })
    }

    /// Apply command-line overrides
    pub fn apply(mut self, args: &ServeArgs) -> CliResult<Self> {
        if let Some(host) = &args.host {
            self.api.host = host.clone();
        }
        if let Some(port) = args.port {
            self.api.port = port;
        }
        if args.no_cors {
            self.api.enable_cors = false;
        }
        if let Some(store) = &args.store {
            self.store.backend = StoreBackend::parse(store)
                .ok_or_else(|| CliError::config(format!("Unknown store backend: {}", store)))?;
        }
        if let Some(dir) = &args.data_dir {
            self.store.data_dir = dir.clone();
        }
        Ok(self)
    }
}

/// Build the logging configuration from flag values
pub fn log_config(level: &str, format: &str) -> CliResult<LogConfig> {
    let level = LogLevel::parse(level)
        .ok_or_else(|| CliError::config(format!("Unknown log level: {}", level)))?;
    let format = LogFormat::parse(format)
        .ok_or_else(|| CliError::config(format!("Unknown log format: {}", format)))?;

    Ok(LogConfig::default().with_level(level).with_format(format))
}
