//! Shared test utilities for the trade-ledger test suite

use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use trade_ledger::TradeLedger;
use trade_ledger::persistence::{self, TradeStore};

/// Open a fresh in-memory database with the schema applied.
///
/// A single connection keeps every query on the same in-memory database.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    persistence::run_migrations(&pool)
        .await
        .expect("migrations");
    pool
}

/// Ledger backed by a fresh in-memory store, plus the pool for direct checks
pub async fn memory_ledger() -> (TradeLedger, SqlitePool) {
    let pool = memory_pool().await;
    let ledger = TradeLedger::with_store(TradeStore::new(pool.clone()));
    (ledger, pool)
}

/// A complete submission payload
pub fn submission(user_id: &str, ticker: &str, side: &str, price: f64, volume: i64) -> Value {
    json!({
        "user_id": user_id,
        "ticker": ticker,
        "side": side,
        "price": price,
        "volume": volume,
    })
}

/// Total number of persisted trades
pub async fn trade_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM trades")
        .fetch_one(pool)
        .await
        .expect("count query")
}
