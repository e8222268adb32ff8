//! Persistence contract for the trade journal.

use async_trait::async_trait;
use thiserror::Error;

use crate::trade::Trade;

mod memory;

pub use memory::InMemoryTradeRepository;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested identifier has no stored trade. Surfaced distinctly so
    /// the web layer can map it to a 404.
    #[error("trade not found")]
    NotFound,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Persistence operations required by the service layer.
///
/// Implementations hand back independent copies on every read: a caller
/// mutating a returned [`Trade`] must never corrupt stored state. Ordering
/// of [`list`](TradeRepository::list) is unspecified; sorting is the
/// service's responsibility. Updates are last-writer-wins, with no version
/// precondition.
#[async_trait]
pub trait TradeRepository: Send + Sync {
    /// Stores a new trade, assigning an identifier when none is set, and
    /// returns the stored snapshot.
    async fn create(&self, trade: Trade) -> Result<Trade, StorageError>;

    /// Replaces an existing trade wholesale. Fails with
    /// [`StorageError::NotFound`] when the identifier is empty or unknown.
    async fn update(&self, trade: Trade) -> Result<Trade, StorageError>;

    /// Removes a trade permanently.
    async fn delete(&self, id: &str) -> Result<(), StorageError>;

    /// Fetches a snapshot of one trade.
    async fn get(&self, id: &str) -> Result<Trade, StorageError>;

    /// Returns all stored trades in no particular order.
    async fn list(&self) -> Result<Vec<Trade>, StorageError>;
}
