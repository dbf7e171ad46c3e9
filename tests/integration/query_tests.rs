//! Integration tests for statistics and history queries

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use trade_ledger::error::LedgerError;
use trade_ledger::handlers::TradeHandlers;
use trade_ledger::handlers::trades::UserQuery;
use trade_ledger::trade::TradeStatus;
use trade_ledger::{SubmissionOutcome, TradeLedger};

use crate::common;

/// Ledger seeded with three confirmed trades across two tickers
async fn seeded_ledger() -> TradeLedger {
    let (ledger, _pool) = common::memory_ledger().await;

    for (ticker, price, volume) in [("X", 10.0, 2), ("X", 20.0, 2), ("Y", 5.0, 3)] {
        let outcome = ledger
            .submit_trade(&common::submission("u1", ticker, "buy", price, volume))
            .await;
        assert!(matches!(outcome, SubmissionOutcome::Confirmed { .. }));
    }

    ledger
}

#[tokio::test]
async fn test_stats_cover_every_ticker() {
    let ledger = seeded_ledger().await;

    let stats = ledger.ticker_stats("u1").await.unwrap();
    assert_eq!(stats.len(), 2);

    let x = &stats["X"];
    assert_eq!(x.highest_price, 20.0);
    assert_eq!(x.lowest_price, 10.0);
    assert_eq!(x.total_volume, 4);
    assert_eq!(x.total_value, 60.0);
    assert_eq!(x.vwap, 15.0);

    let y = &stats["Y"];
    assert_eq!(y.highest_price, 5.0);
    assert_eq!(y.lowest_price, 5.0);
    assert_eq!(y.vwap, 5.0);
}

#[tokio::test]
async fn test_history_preserves_insertion_order() {
    let ledger = seeded_ledger().await;

    let trades = ledger.historical_trades("u1").await.unwrap();
    assert_eq!(trades.len(), 3);
    assert_eq!(trades[0].ticker, "X");
    assert_eq!(trades[1].ticker, "X");
    assert_eq!(trades[2].ticker, "Y");
    assert!(trades.windows(2).all(|pair| pair[0].id < pair[1].id));
    assert!(
        trades
            .iter()
            .all(|trade| trade.status == TradeStatus::Successful)
    );
}

#[tokio::test]
async fn test_reads_are_idempotent() {
    let ledger = seeded_ledger().await;

    let first_stats = ledger.ticker_stats("u1").await.unwrap();
    let second_stats = ledger.ticker_stats("u1").await.unwrap();
    assert_eq!(first_stats, second_stats);

    let first_history = ledger.historical_trades("u1").await.unwrap();
    let second_history = ledger.historical_trades("u1").await.unwrap();
    assert_eq!(first_history, second_history);
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let ledger = seeded_ledger().await;

    let stats_error = ledger.ticker_stats("nobody").await.unwrap_err();
    assert!(matches!(stats_error, LedgerError::NotFound { .. }));

    let history_error = ledger.historical_trades("nobody").await.unwrap_err();
    match history_error {
        LedgerError::NotFound { user_id } => assert_eq!(user_id, "nobody"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_other_users_trades_stay_invisible() {
    let ledger = seeded_ledger().await;

    let outcome = ledger
        .submit_trade(&common::submission("u2", "X", "sell", 1000.0, 7))
        .await;
    assert!(matches!(outcome, SubmissionOutcome::Confirmed { .. }));

    let stats = ledger.ticker_stats("u1").await.unwrap();
    assert_eq!(stats["X"].highest_price, 20.0);
    assert_eq!(stats["X"].total_volume, 4);

    let history = ledger.historical_trades("u1").await.unwrap();
    assert_eq!(history.len(), 3);
}

#[tokio::test]
async fn test_stats_endpoint_requires_user_id() {
    let (ledger, _pool) = common::memory_ledger().await;
    let handlers = TradeHandlers::new(Arc::new(ledger));

    let (status, response) =
        TradeHandlers::get_stats(State(handlers), Query(UserQuery { user_id: None })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = response.0;
    assert!(!body.success);
    assert_eq!(body.error.unwrap().error, "MISSING_PARAMETER");
}

#[tokio::test]
async fn test_history_endpoint_requires_user_id() {
    let (ledger, _pool) = common::memory_ledger().await;
    let handlers = TradeHandlers::new(Arc::new(ledger));

    let (status, response) =
        TradeHandlers::get_history(State(handlers), Query(UserQuery { user_id: None })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response.0.error.unwrap().error, "MISSING_PARAMETER");
}
