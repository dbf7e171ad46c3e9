//! Trade ledger service
//!
//! Records user-submitted trades with a two-phase lifecycle status
//! (validate, persist pending, then confirm or mark failed) and serves
//! per-ticker statistics and historical listings per user.
//!
//! Features:
//! - Submission workflow with an enumerable outcome for every path
//! - Monotonic status lifecycle (pending is left exactly once)
//! - Durable SQLite persistence with conditional status updates
//! - Single-pass per-ticker aggregation including VWAP

#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{debug, error, info, warn};

pub mod config;
pub mod error;
pub mod handlers;
pub mod lifecycle;
pub mod models;
pub mod persistence;
pub mod server;
pub mod stats;
pub mod trade;
pub mod validation;

use config::LedgerConfig;
use error::{LedgerError, LedgerResult};
use lifecycle::TradeLifecycle;
use persistence::TradeStore;
use stats::TickerStats;
use trade::{Trade, TradeStatus};

/// Outcome of a trade submission; every workflow path maps to one variant
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Trade persisted and confirmed successful
    Confirmed {
        /// The confirmed record
        trade: Trade,
    },
    /// Trade persisted durably but could not be confirmed; the record
    /// remains with failed status
    MarkedFailed {
        /// Identifier of the durable failed record
        trade_id: i64,
    },
    /// Submission rejected by validation; nothing was persisted
    Rejected {
        /// The validation failure, surfaced verbatim to the caller
        error: LedgerError,
    },
    /// The store failed before any record existed
    InternalError,
}

/// Main trade ledger service
#[derive(Debug)]
pub struct TradeLedger {
    /// Trade store
    store: TradeStore,
    /// Lifecycle manager
    lifecycle: TradeLifecycle,
    /// Counters
    metrics: Arc<LedgerMetrics>,
}

impl TradeLedger {
    /// Create a new ledger over the configured database
    pub async fn new(config: &LedgerConfig) -> anyhow::Result<Self> {
        info!("Initializing trade ledger");

        let db_pool = SqlitePoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect(&config.database.url)
            .await?;

        persistence::run_migrations(&db_pool).await?;

        info!("Trade ledger initialized");
        Ok(Self::with_store(TradeStore::new(db_pool)))
    }

    /// Build a ledger over an existing store
    #[must_use]
    pub fn with_store(store: TradeStore) -> Self {
        Self {
            store,
            lifecycle: TradeLifecycle::new(),
            metrics: Arc::new(LedgerMetrics::default()),
        }
    }

    /// Run the submission workflow: validate, persist pending, then
    /// confirm or mark failed.
    ///
    /// Faults never escape; every path returns an enumerable outcome.
    /// Once `create` succeeds the attempt is never silently lost: the
    /// record ends up either successful or failed, never pending.
    pub async fn submit_trade(&self, payload: &Value) -> SubmissionOutcome {
        let submission = match validation::validate_submission(payload) {
            Ok(submission) => submission,
            Err(error) => {
                self.metrics
                    .submissions_rejected
                    .fetch_add(1, Ordering::Relaxed);
                debug!("Submission rejected: {}", error);
                return SubmissionOutcome::Rejected { error };
            }
        };

        let trade = match self.store.create(&submission).await {
            Ok(trade) => trade,
            Err(create_error) => {
                error!(
                    "Trade create failed for user {}: {}",
                    submission.user_id, create_error
                );
                return SubmissionOutcome::InternalError;
            }
        };
        self.metrics.trades_created.fetch_add(1, Ordering::Relaxed);

        match self.confirm(&trade).await {
            Ok(()) => {
                self.metrics.trades_confirmed.fetch_add(1, Ordering::Relaxed);
                info!("Trade {} confirmed for user {}", trade.id, trade.user_id);
                SubmissionOutcome::Confirmed {
                    trade: Trade {
                        status: TradeStatus::Successful,
                        ..trade
                    },
                }
            }
            Err(confirm_error) => {
                warn!("Trade {} confirmation failed: {}", trade.id, confirm_error);
                self.mark_failed(trade.id).await;
                self.metrics.trades_failed.fetch_add(1, Ordering::Relaxed);
                SubmissionOutcome::MarkedFailed { trade_id: trade.id }
            }
        }
    }

    /// Post-create verification: re-read the record and promote it to
    /// successful.
    async fn confirm(&self, trade: &Trade) -> LedgerResult<()> {
        let persisted =
            self.store
                .load_trade(trade.id)
                .await?
                .ok_or_else(|| LedgerError::Internal {
                    context: format!("trade {} missing after create", trade.id),
                })?;

        self.lifecycle
            .validate_transition(persisted.id, persisted.status, TradeStatus::Successful)?;
        self.store
            .set_status(trade.id, TradeStatus::Pending, TradeStatus::Successful)
            .await
    }

    /// Best-effort terminal marking; errors here are logged and swallowed
    /// so the workflow still reports the record as failed.
    async fn mark_failed(&self, trade_id: i64) {
        if let Err(mark_error) = self
            .store
            .set_status(trade_id, TradeStatus::Pending, TradeStatus::Failed)
            .await
        {
            error!("Trade {} could not be marked failed: {}", trade_id, mark_error);
        }
    }

    /// Per-ticker statistics over the user's full trade set.
    ///
    /// Fetches a snapshot first; aggregation then runs without touching
    /// the store. A user with no trades is a `NotFound`, not an empty map.
    pub async fn ticker_stats(&self, user_id: &str) -> LedgerResult<FxHashMap<String, TickerStats>> {
        let trades = self.store.trades_for_user(user_id).await?;
        if trades.is_empty() {
            return Err(LedgerError::NotFound {
                user_id: user_id.to_string(),
            });
        }
        Ok(stats::aggregate_by_ticker(&trades))
    }

    /// A user's trades in insertion order.
    ///
    /// A user with no trades is a `NotFound`, not an empty list.
    pub async fn historical_trades(&self, user_id: &str) -> LedgerResult<Vec<Trade>> {
        let trades = self.store.trades_for_user(user_id).await?;
        if trades.is_empty() {
            return Err(LedgerError::NotFound {
                user_id: user_id.to_string(),
            });
        }
        Ok(trades)
    }

    /// Current counter values
    #[must_use]
    pub fn metrics(&self) -> LedgerMetricsSnapshot {
        LedgerMetricsSnapshot {
            trades_created: self.metrics.trades_created.load(Ordering::Relaxed),
            trades_confirmed: self.metrics.trades_confirmed.load(Ordering::Relaxed),
            trades_failed: self.metrics.trades_failed.load(Ordering::Relaxed),
            submissions_rejected: self.metrics.submissions_rejected.load(Ordering::Relaxed),
        }
    }
}

/// Ledger counters
#[derive(Debug, Default)]
pub struct LedgerMetrics {
    /// Trades persisted with pending status
    pub trades_created: AtomicU64,
    /// Trades confirmed successful
    pub trades_confirmed: AtomicU64,
    /// Trades marked failed after create
    pub trades_failed: AtomicU64,
    /// Submissions rejected by validation
    pub submissions_rejected: AtomicU64,
}

/// Point-in-time view of the ledger counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerMetricsSnapshot {
    /// Trades persisted with pending status
    pub trades_created: u64,
    /// Trades confirmed successful
    pub trades_confirmed: u64,
    /// Trades marked failed after create
    pub trades_failed: u64,
    /// Submissions rejected by validation
    pub submissions_rejected: u64,
}
