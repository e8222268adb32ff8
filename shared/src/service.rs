//! Trade workflows on top of the repository: timestamp stamping, tag
//! normalization and listing order.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;

use crate::storage::{StorageError, TradeRepository};
use crate::trade::{FollowUp, Trade};

pub struct TradeService {
    repo: Arc<dyn TradeRepository>,
}

impl TradeService {
    pub fn new(repo: Arc<dyn TradeRepository>) -> Self {
        Self { repo }
    }

    /// Persists a new trade with both timestamps set to now.
    pub async fn create(&self, mut trade: Trade) -> Result<Trade, StorageError> {
        let now = Utc::now();
        trade.created_at = now;
        trade.updated_at = now;
        normalize_tags(&mut trade);
        let stored = self.repo.create(trade).await?;
        tracing::debug!(id = %stored.id, instrument = %stored.instrument, "trade created");
        Ok(stored)
    }

    /// Re-persists an existing trade. `created_at` is preserved as supplied
    /// by the caller; only `updated_at` is refreshed.
    pub async fn update(&self, mut trade: Trade) -> Result<Trade, StorageError> {
        trade.updated_at = Utc::now();
        normalize_tags(&mut trade);
        self.repo.update(trade).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.repo.delete(id).await?;
        tracing::debug!(id = %id, "trade deleted");
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<Trade, StorageError> {
        self.repo.get(id).await
    }

    /// All trades, newest creation first. The sort is stable, so trades
    /// created at the same instant keep their repository order.
    pub async fn list(&self) -> Result<Vec<Trade>, StorageError> {
        let mut trades = self.repo.list().await?;
        trades.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(trades)
    }

    /// Appends a follow-up observation, stamping `logged_at`, and
    /// re-persists the whole aggregate.
    pub async fn add_follow_up(
        &self,
        trade_id: &str,
        mut follow_up: FollowUp,
    ) -> Result<Trade, StorageError> {
        let mut trade = self.repo.get(trade_id).await?;
        follow_up.logged_at = Utc::now();
        trade.updated_at = follow_up.logged_at;
        trade.follow_ups.push(follow_up);
        normalize_tags(&mut trade);
        self.repo.update(trade).await
    }
}

/// Trims, lower-cases and de-duplicates review tags, dropping the ones that
/// end up empty. First occurrence wins, insertion order is preserved.
/// Applied on every persist so any path produces clean tags.
fn normalize_tags(trade: &mut Trade) {
    let mut seen = HashSet::new();
    let mut cleaned = Vec::with_capacity(trade.review.tags.len());
    for tag in &trade.review.tags {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() || !seen.insert(tag.clone()) {
            continue;
        }
        cleaned.push(tag);
    }
    trade.review.tags = cleaned;
}
