pub mod config;
pub mod service;
pub mod storage;
pub mod trade;

pub use config::Config;
pub use service::TradeService;
pub use storage::{InMemoryTradeRepository, StorageError, TradeRepository};
pub use trade::{
    Direction, EntryDetail, ExitDetail, FollowUp, RiskManagement, Trade, TradeReview,
};
