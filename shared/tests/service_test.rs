//! Integration tests for the trade service on top of the in-memory store.

use std::sync::Arc;
use std::time::Duration;

use shared::{
    EntryDetail, FollowUp, InMemoryTradeRepository, StorageError, Trade, TradeReview,
    TradeService,
};

fn service() -> TradeService {
    TradeService::new(Arc::new(InMemoryTradeRepository::new()))
}

fn sample(instrument: &str) -> Trade {
    Trade {
        instrument: instrument.to_string(),
        entry: EntryDetail {
            price: 150.0,
            quantity: 10.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

#[tokio::test]
async fn create_stamps_timestamps_and_lists() {
    let svc = service();

    let stored = svc.create(sample("EURUSD")).await.unwrap();
    assert!(!stored.id.is_empty());
    assert!(stored.updated_at >= stored.created_at);

    let trades = svc.list().await.unwrap();
    assert_eq!(trades.len(), 1);
}

#[tokio::test]
async fn list_sorts_newest_first() {
    let svc = service();

    let first = svc.create(sample("FIRST")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = svc.create(sample("SECOND")).await.unwrap();

    let trades = svc.list().await.unwrap();
    assert_eq!(trades[0].id, second.id);
    assert_eq!(trades[1].id, first.id);
}

#[tokio::test]
async fn add_follow_up_stamps_logged_at() {
    let svc = service();

    let stored = svc.create(sample("AAPL")).await.unwrap();
    let before = stored.updated_at;

    tokio::time::sleep(Duration::from_millis(5)).await;
    let updated = svc
        .add_follow_up(
            &stored.id,
            FollowUp {
                days_after: 7,
                price: 165.0,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.follow_ups.len(), 1);
    assert!(updated.follow_ups[0].logged_at > before);
    assert!(updated.updated_at >= updated.follow_ups[0].logged_at);
}

#[tokio::test]
async fn add_follow_up_unknown_trade() {
    let svc = service();
    let result = svc.add_follow_up("missing", FollowUp::default()).await;
    assert!(matches!(result, Err(StorageError::NotFound)));
}

#[tokio::test]
async fn tags_are_normalized_on_create() {
    let svc = service();

    let mut trade = sample("BTCUSD");
    trade.review = TradeReview {
        tags: vec![" Breakout ".into(), "Momentum".into(), "".into()],
        ..Default::default()
    };

    let stored = svc.create(trade).await.unwrap();
    assert_eq!(stored.review.tags, vec!["breakout", "momentum"]);
}

#[tokio::test]
async fn update_keeps_created_at() {
    let svc = service();

    let mut stored = svc.create(sample("ETHUSD")).await.unwrap();
    let created = stored.created_at;

    tokio::time::sleep(Duration::from_millis(10)).await;
    stored.instrument = "ETHUSDT".to_string();
    let updated = svc.update(stored).await.unwrap();

    assert_eq!(updated.created_at, created);
    assert!(updated.updated_at > created);
}
