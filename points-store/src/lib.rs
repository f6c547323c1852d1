//! Receipt Store
//!
//! Write-once, read-many persistence for scored receipts, keyed by receipt id.
//! Records are stored as JSON with no expiration. There is no update, delete,
//! or secondary index.

pub mod error;
pub mod memory;
pub mod sled;

use async_trait::async_trait;
use points_core::{ReceiptId, ScoredReceipt};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use self::sled::SledStore;

/// Receipt store interface
#[async_trait]
pub trait ReceiptStore: Send + Sync {
    /// Write a scored receipt under its id, overwriting any existing value
    async fn store(&self, receipt: &ScoredReceipt) -> StoreResult<()>;

    /// Read a scored receipt by id
    ///
    /// Returns [`StoreError::NotFound`] when no record exists.
    async fn fetch(&self, id: &ReceiptId) -> StoreResult<ScoredReceipt>;

    /// Check that the backend is reachable
    async fn ping(&self) -> StoreResult<()>;

    /// Flush pending writes and release the backend
    async fn close(&self) -> StoreResult<()>;

    /// Backend name for logs
    fn backend_name(&self) -> &'static str;
}

/// Store backend type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-process map, lost on exit
    Memory,
    /// Embedded sled database
    #[default]
    Sled,
}

impl StoreBackend {
    /// Parse from string (for CLI flags and environment variables)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => Some(Self::Memory),
            "sled" => Some(Self::Sled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Sled => "sled",
        }
    }
}

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Data directory for the sled backend
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sled,
            data_dir: PathBuf::from("./points_data"),
        }
    }
}

impl StoreConfig {
    /// In-memory configuration for tests
    pub fn memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - POINTS_STORE_BACKEND: memory or sled
    /// - POINTS_DATA_DIR: sled data directory
    pub fn from_env() -> StoreResult<Self> {
        let defaults = Self::default();

        let backend = match env::var("POINTS_STORE_BACKEND") {
            Ok(value) => StoreBackend::parse(&value).ok_or_else(|| {
                StoreError::Configuration(format!("Unknown store backend: {}", value))
            })?,
            Err(_) => defaults.backend,
        };

        Ok(Self {
            backend,
            data_dir: env::var("POINTS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
        })
    }
}

/// Open the configured store and verify it is reachable
pub async fn open_store(config: &StoreConfig) -> StoreResult<Arc<dyn ReceiptStore>> {
    let store: Arc<dyn ReceiptStore> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Sled => Arc::new(SledStore::open(&config.data_dir)?),
    };

    store.ping().await?;

    tracing::info!(
        backend = store.backend_name(),
        data_dir = %config.data_dir.display(),
        "Receipt store opened"
    );

    Ok(store)
}
