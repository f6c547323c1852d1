//! Sled persistent receipt store
//!
//! All receipts live in a single tree keyed by the receipt id bytes.

use async_trait::async_trait;
use points_core::{ReceiptId, ScoredReceipt};
use std::path::Path;

use crate::error::{StoreError, StoreResult};
use crate::ReceiptStore;

const RECEIPTS_TREE: &str = "receipts";

/// Sled store
#[derive(Debug, Clone)]
pub struct SledStore {
    db: sled::Db,
    receipts: sled::Tree,
}

impl SledStore {
    /// Open or create the database at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let db = sled::open(path)
            .map_err(|e| StoreError::Unavailable(format!("Failed to open sled db: {}", e)))?;

        let receipts = db
            .open_tree(RECEIPTS_TREE)
            .map_err(|e| StoreError::Unavailable(format!("Failed to open receipts tree: {}", e)))?;

        Ok(Self { db, receipts })
    }

    /// Number of stored receipts
    pub fn len(&self) -> usize {
        self.receipts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receipts.is_empty()
    }

    fn serialize(receipt: &ScoredReceipt) -> StoreResult<Vec<u8>> {
        serde_json::to_vec(receipt)
            .map_err(|e| StoreError::Unavailable(format!("Failed to encode receipt: {}", e)))
    }

    fn deserialize(id: &ReceiptId, bytes: &[u8]) -> StoreResult<ScoredReceipt> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Corrupt(format!("{}: {}", id, e)))
    }
}

#[async_trait]
impl ReceiptStore for SledStore {
    async fn store(&self, receipt: &ScoredReceipt) -> StoreResult<()> {
        let value = Self::serialize(receipt)?;

        self.receipts
            .insert(receipt.id.as_str().as_bytes(), value)
            .map_err(|e| StoreError::Unavailable(format!("Failed to save receipt: {}", e)))?;

        Ok(())
    }

    async fn fetch(&self, id: &ReceiptId) -> StoreResult<ScoredReceipt> {
        match self
            .receipts
            .get(id.as_str().as_bytes())
            .map_err(|e| StoreError::Unavailable(format!("Failed to get receipt: {}", e)))?
        {
            Some(bytes) => Self::deserialize(id, &bytes),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        self.receipts.first()?;
        Ok(())
    }

    async fn close(&self) -> StoreResult<()> {
        self.db
            .flush_async()
            .await
            .map_err(|e| StoreError::Unavailable(format!("Failed to flush db: {}", e)))?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "sled"
    }
}
