//! In-memory receipt store, mainly for tests and development

use async_trait::async_trait;
use points_core::{ReceiptId, ScoredReceipt};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::ReceiptStore;

/// Memory store
///
/// Values are held in their serialized JSON form so that reads go through the
/// same decode path as a persistent backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<HashMap<ReceiptId, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored receipts
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Insert a raw value under a key, bypassing serialization
    pub async fn insert_raw(&self, id: ReceiptId, value: impl Into<String>) {
        self.records.write().await.insert(id, value.into());
    }
}

#[async_trait]
impl ReceiptStore for MemoryStore {
    async fn store(&self, receipt: &ScoredReceipt) -> StoreResult<()> {
        let value = serde_json::to_string(receipt)
            .map_err(|e| StoreError::Unavailable(format!("Failed to encode receipt: {}", e)))?;

        self.records.write().await.insert(receipt.id.clone(), value);
        Ok(())
    }

    async fn fetch(&self, id: &ReceiptId) -> StoreResult<ScoredReceipt> {
        let records = self.records.read().await;
        let value = records
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        serde_json::from_str(value).map_err(|e| StoreError::Corrupt(format!("{}: {}", id, e)))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn close(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
