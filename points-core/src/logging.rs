//! Structured Logging
//!
//! Log output is pretty-printed for development and JSON for production.
//!
//! Use structured fields for key information:
//! - `receipt_id`: Receipt identifier
//! - `points`: Computed point total
//! - `error`: Error message
//!
//! ```ignore
//! tracing::info!(receipt_id = %scored.id, points = scored.points, "Receipt processed");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing_subscriber::{fmt as layer_fmt, prelude::*, EnvFilter};

use crate::error::{CoreError, CoreResult};

/// Log level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse from string (for CLI flags and environment variables)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Pretty-printed for development
    #[default]
    Pretty,
    /// JSON for production
    Json,
    /// Compact single-line
    Compact,
}

impl LogFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    /// Include source file/line
    pub include_source: bool,
    /// Filter directive overriding `level` (e.g. "points_api=debug,tower_http=warn")
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
            include_source: false,
            filter: None,
        }
    }
}

impl LogConfig {
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Filter directive actually handed to the subscriber
    pub fn directive(&self) -> String {
        match &self.filter {
            Some(f) => f.clone(),
            None => format!(
                "points_core={level},points_store={level},points_api={level},points_cli={level},tower_http={level}",
                level = self.level
            ),
        }
    }
}

/// Install the global tracing subscriber
pub fn init_logging(config: &LogConfig) -> CoreResult<()> {
    let filter =
        EnvFilter::try_new(config.directive()).map_err(|e| CoreError::Logging(e.to_string()))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Json => registry
            .with(
                layer_fmt::layer()
                    .json()
                    .with_file(config.include_source)
                    .with_line_number(config.include_source),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                layer_fmt::layer()
                    .pretty()
                    .with_file(config.include_source)
                    .with_line_number(config.include_source),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                layer_fmt::layer()
                    .compact()
                    .with_file(config.include_source)
                    .with_line_number(config.include_source),
            )
            .try_init(),
    };

    result.map_err(|e| CoreError::Logging(e.to_string()))
}
