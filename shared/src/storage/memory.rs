//! In-memory repository backed by a locked map.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::trade::Trade;

use super::{StorageError, TradeRepository};

/// Map-backed repository. A read/write lock keeps it correct under
/// concurrent requests; every read hands out a clone of the stored trade.
#[derive(Default)]
pub struct InMemoryTradeRepository {
    trades: RwLock<HashMap<String, Trade>>,
}

impl InMemoryTradeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TradeRepository for InMemoryTradeRepository {
    async fn create(&self, mut trade: Trade) -> Result<Trade, StorageError> {
        let mut trades = self.trades.write().await;

        if trade.id.is_empty() {
            trade.id = Uuid::new_v4().to_string();
        }
        trade.updated_at = Utc::now();

        trades.insert(trade.id.clone(), trade.clone());
        Ok(trade)
    }

    async fn update(&self, mut trade: Trade) -> Result<Trade, StorageError> {
        let mut trades = self.trades.write().await;

        if trade.id.is_empty() || !trades.contains_key(&trade.id) {
            return Err(StorageError::NotFound);
        }
        trade.updated_at = Utc::now();

        trades.insert(trade.id.clone(), trade.clone());
        Ok(trade)
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let mut trades = self.trades.write().await;
        trades.remove(id).map(|_| ()).ok_or(StorageError::NotFound)
    }

    async fn get(&self, id: &str) -> Result<Trade, StorageError> {
        let trades = self.trades.read().await;
        trades.get(id).cloned().ok_or(StorageError::NotFound)
    }

    async fn list(&self) -> Result<Vec<Trade>, StorageError> {
        let trades = self.trades.read().await;
        Ok(trades.values().cloned().collect())
    }
}
