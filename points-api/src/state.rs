//! Application state for the API server

use points_store::ReceiptStore;
use std::env;
use std::sync::Arc;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Receipt store, opened once at startup
    pub store: Arc<dyn ReceiptStore>,
    /// API version
    pub version: String,
}

impl AppState {
    pub fn new(store: Arc<dyn ReceiptStore>) -> Self {
        Self {
            store,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - POINTS_HOST: Bind address
    /// - POINTS_PORT: Listen port
    /// - POINTS_ENABLE_CORS: "true" or "false"
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("POINTS_HOST").unwrap_or(defaults.host),
            port: env::var("POINTS_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            enable_cors: env::var("POINTS_ENABLE_CORS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.enable_cors),
        }
    }
}
