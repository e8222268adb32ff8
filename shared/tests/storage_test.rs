//! Integration tests for the in-memory repository.

use shared::{EntryDetail, InMemoryTradeRepository, StorageError, Trade, TradeRepository};

fn sample(instrument: &str) -> Trade {
    Trade {
        instrument: instrument.to_string(),
        entry: EntryDetail {
            price: 10.0,
            quantity: 100.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[tokio::test]
async fn create_assigns_id_and_roundtrips() {
    let repo = InMemoryTradeRepository::new();

    let stored = repo.create(sample("TSLA")).await.unwrap();
    assert!(!stored.id.is_empty());

    let fetched = repo.get(&stored.id).await.unwrap();
    assert_eq!(fetched.instrument, "TSLA");
}

#[tokio::test]
async fn update_replaces_stored_trade() {
    let repo = InMemoryTradeRepository::new();

    let mut stored = repo.create(sample("TSLA")).await.unwrap();
    stored.instrument = "AAPL".to_string();
    repo.update(stored.clone()).await.unwrap();

    let list = repo.list().await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].instrument, "AAPL");
}

#[tokio::test]
async fn reads_return_independent_copies() {
    let repo = InMemoryTradeRepository::new();

    let stored = repo.create(sample("TSLA")).await.unwrap();

    let mut copy = repo.get(&stored.id).await.unwrap();
    copy.instrument = "MUTATED".to_string();

    let fetched = repo.get(&stored.id).await.unwrap();
    assert_eq!(fetched.instrument, "TSLA");
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let repo = InMemoryTradeRepository::new();

    let stored = repo.create(sample("TSLA")).await.unwrap();
    repo.delete(&stored.id).await.unwrap();

    assert!(matches!(
        repo.get(&stored.id).await,
        Err(StorageError::NotFound)
    ));
    assert!(matches!(
        repo.delete(&stored.id).await,
        Err(StorageError::NotFound)
    ));
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let repo = InMemoryTradeRepository::new();

    let mut trade = sample("TSLA");
    trade.id = "missing".to_string();
    assert!(matches!(
        repo.update(trade).await,
        Err(StorageError::NotFound)
    ));

    let blank = sample("TSLA");
    assert!(matches!(
        repo.update(blank).await,
        Err(StorageError::NotFound)
    ));
}
