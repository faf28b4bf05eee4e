//! Integration tests for [`relay_bot::BroadcastEngine`].
//!
//! Covers: success accounting with failures at any position, all recipients attempted, per-send
//! timeout, bounded concurrency, empty registry and storage failure.

mod common;

use common::{MockBot, MockStore};
use relay_bot::{BroadcastEngine, DeliveryOutcome};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use storage::{UserRepository, UserStore};

fn engine(store: Arc<MockStore>, bot: Arc<MockBot>, concurrency: usize) -> BroadcastEngine {
    BroadcastEngine::new(store, bot, Duration::from_secs(5), concurrency)
}

/// **Test: N registered, N−M failing → returns M and attempts all N, wherever the failures sit.**
#[tokio::test]
async fn test_broadcast_counts_only_successful_sends() {
    let ids: Vec<i64> = (1..=10).collect();
    for failing in [vec![1], vec![10], vec![3, 4, 5], vec![], (1..=10).collect::<Vec<_>>()] {
        let store = Arc::new(MockStore::with_ids(&ids));
        let bot = Arc::new(MockBot::failing(&failing));

        let report = engine(store, bot.clone(), 1)
            .broadcast("News")
            .await
            .unwrap();

        assert_eq!(report.total(), 10);
        assert_eq!(report.delivered(), 10 - failing.len());
        let attempted: HashSet<i64> = bot.sent().into_iter().map(|(id, _)| id).collect();
        assert_eq!(attempted, ids.iter().copied().collect());
        assert!(bot.sent().iter().all(|(_, text)| text == "News"));
    }
}

/// **Test: failed attempts carry the transport error.**
#[tokio::test]
async fn test_failed_attempt_records_error() {
    let store = Arc::new(MockStore::with_ids(&[7]));
    let bot = Arc::new(MockBot::failing(&[7]));

    let report = engine(store, bot, 1).broadcast("x").await.unwrap();

    match &report.attempts[0].outcome {
        DeliveryOutcome::Failed(e) => assert!(e.contains("blocked")),
        other => panic!("expected Failed, got {:?}", other),
    }
}

/// **Test: a hanging send times out, counts as failure, and does not block the others.**
#[tokio::test]
async fn test_hanging_send_times_out() {
    let store = Arc::new(MockStore::with_ids(&[1, 2, 3]));
    let bot = Arc::new(MockBot {
        hanging: [2].into_iter().collect(),
        ..MockBot::default()
    });

    let report = BroadcastEngine::new(store, bot, Duration::from_millis(50), 1)
        .broadcast("x")
        .await
        .unwrap();

    assert_eq!(report.delivered(), 2);
    let timed_out: Vec<i64> = report
        .attempts
        .iter()
        .filter(|a| a.outcome == DeliveryOutcome::TimedOut)
        .map(|a| a.user_id)
        .collect();
    assert_eq!(timed_out, vec![2]);
}

/// **Test: concurrent delivery gives the same accounting as sequential delivery.**
#[tokio::test]
async fn test_concurrent_broadcast_accounting() {
    let ids: Vec<i64> = (1..=50).collect();
    let failing: Vec<i64> = ids.iter().copied().filter(|id| id % 7 == 0).collect();
    let store = Arc::new(MockStore::with_ids(&ids));
    let bot = Arc::new(MockBot::failing(&failing));

    let report = engine(store, bot.clone(), 8).broadcast("x").await.unwrap();

    assert_eq!(report.total(), 50);
    assert_eq!(report.delivered(), 50 - failing.len());
    assert_eq!(bot.sent().len(), 50);
}

/// **Test: empty registry → zero deliveries, no sends.**
#[tokio::test]
async fn test_broadcast_to_empty_registry() {
    let store = Arc::new(MockStore::default());
    let bot = Arc::new(MockBot::default());

    let report = engine(store, bot.clone(), 1).broadcast("x").await.unwrap();

    assert_eq!(report.delivered(), 0);
    assert!(bot.sent().is_empty());
}

/// **Test: failing to read the registry is an error and nothing is sent.**
#[tokio::test]
async fn test_broadcast_storage_failure() {
    let store = Arc::new(MockStore::broken());
    let bot = Arc::new(MockBot::default());

    assert!(engine(store, bot.clone(), 1).broadcast("x").await.is_err());
    assert!(bot.sent().is_empty());
}

/// **Test: broadcast over the SQLite registry reaches every registered user once.**
#[tokio::test]
async fn test_broadcast_over_sqlite_registry() {
    let repo = UserRepository::new("sqlite::memory:").await.unwrap();
    for id in [11, 12, 13, 12, 11] {
        repo.ensure_registered(id).await.unwrap();
    }
    let bot = Arc::new(MockBot::failing(&[13]));

    let report = BroadcastEngine::new(Arc::new(repo), bot.clone(), Duration::from_secs(5), 2)
        .broadcast("hi")
        .await
        .unwrap();

    assert_eq!(report.total(), 3);
    assert_eq!(report.delivered(), 2);
    assert_eq!(bot.sent().len(), 3);
}
