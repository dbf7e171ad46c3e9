//! Trade persistence layer
//!
//! SQLite-backed store. The status-transition contract is enforced here
//! with a conditional single-statement update, so a reader can never
//! observe a status that was not actually assigned.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::trade::{Trade, TradeSide, TradeStatus, TradeSubmission};

/// Persistence manager for trades
#[derive(Debug, Clone)]
pub struct TradeStore {
    /// Database pool
    db_pool: SqlitePool,
}

impl TradeStore {
    /// Create a new trade store
    #[must_use]
    pub const fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    /// Persist a new trade with pending status and a store-assigned timestamp.
    ///
    /// The insert is durable before this returns; the persisted record,
    /// including its assigned id, is handed back to the caller.
    pub async fn create(&self, submission: &TradeSubmission) -> LedgerResult<Trade> {
        let timestamp = Utc::now();
        let status = TradeStatus::Pending;

        let result = sqlx::query(
            r"
            INSERT INTO trades (user_id, ticker, side, price, volume, timestamp, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(&submission.user_id)
        .bind(&submission.ticker)
        .bind(submission.side.as_str())
        .bind(submission.price)
        .bind(submission.volume)
        .bind(timestamp)
        .bind(status.as_str())
        .execute(&self.db_pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Trade {} persisted for user {}", id, submission.user_id);

        Ok(Trade {
            id,
            user_id: submission.user_id.clone(),
            ticker: submission.ticker.clone(),
            side: submission.side,
            price: submission.price,
            volume: submission.volume,
            timestamp,
            status,
        })
    }

    /// Atomically transition a trade's status.
    ///
    /// The update only applies while the trade still holds `from`; zero
    /// affected rows means the precondition no longer holds, which is
    /// distinguishable from an I/O failure.
    pub async fn set_status(
        &self,
        trade_id: i64,
        from: TradeStatus,
        to: TradeStatus,
    ) -> LedgerResult<()> {
        let result = sqlx::query(
            r"
            UPDATE trades SET status = $1 WHERE id = $2 AND status = $3
            ",
        )
        .bind(to.as_str())
        .bind(trade_id)
        .bind(from.as_str())
        .execute(&self.db_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::InvalidTransition {
                trade_id,
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        debug!("Trade {} status set to {}", trade_id, to);
        Ok(())
    }

    /// All trades for a user, in insertion order
    pub async fn trades_for_user(&self, user_id: &str) -> LedgerResult<Vec<Trade>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, ticker, side, price, volume, timestamp, status
            FROM trades
            WHERE user_id = $1
            ORDER BY id
            ",
        )
        .bind(user_id)
        .fetch_all(&self.db_pool)
        .await?;

        rows.iter().map(row_to_trade).collect()
    }

    /// Load a single trade by id
    pub async fn load_trade(&self, trade_id: i64) -> LedgerResult<Option<Trade>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, ticker, side, price, volume, timestamp, status
            FROM trades
            WHERE id = $1
            ",
        )
        .bind(trade_id)
        .fetch_optional(&self.db_pool)
        .await?;

        row.as_ref().map(row_to_trade).transpose()
    }
}

fn row_to_trade(row: &SqliteRow) -> LedgerResult<Trade> {
    Ok(Trade {
        id: row.get("id"),
        user_id: row.get("user_id"),
        ticker: row.get("ticker"),
        side: parse_trade_side(&row.get::<String, _>("side"))?,
        price: row.get("price"),
        volume: row.get("volume"),
        timestamp: row.get("timestamp"),
        status: parse_trade_status(&row.get::<String, _>("status"))?,
    })
}

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> LedgerResult<()> {
    info!("Running database migrations");

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS trades (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            ticker TEXT NOT NULL,
            side TEXT NOT NULL,
            price REAL NOT NULL,
            volume INTEGER NOT NULL,
            timestamp TEXT NOT NULL,
            status TEXT NOT NULL
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query(r"CREATE INDEX IF NOT EXISTS idx_trades_user ON trades (user_id)")
        .execute(pool)
        .await?;

    info!("Database migrations completed");
    Ok(())
}

/// Parse a trade side from its stored form
pub fn parse_trade_side(s: &str) -> LedgerResult<TradeSide> {
    match s {
        "buy" => Ok(TradeSide::Buy),
        "sell" => Ok(TradeSide::Sell),
        _ => Err(LedgerError::Internal {
            context: format!("invalid side in store: {s}"),
        }),
    }
}

/// Parse a trade status from its stored form
pub fn parse_trade_status(s: &str) -> LedgerResult<TradeStatus> {
    match s {
        "pending" => Ok(TradeStatus::Pending),
        "successful" => Ok(TradeStatus::Successful),
        "failed" => Ok(TradeStatus::Failed),
        _ => Err(LedgerError::Internal {
            context: format!("invalid status in store: {s}"),
        }),
    }
}
