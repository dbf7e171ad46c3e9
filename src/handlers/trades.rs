//! Trade submission, statistics, and history handlers

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

use crate::error::LedgerError;
use crate::models::{ApiResponse, ErrorResponse, HistoricalTrade, SubmitTradeResponse};
use crate::stats::TickerStats;
use crate::{SubmissionOutcome, TradeLedger};

/// Query parameters for the stats and history endpoints
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    /// Target user; absence is reported in the response body
    pub user_id: Option<String>,
}

/// Trade endpoints
#[derive(Clone)]
pub struct TradeHandlers {
    ledger: Arc<TradeLedger>,
}

impl TradeHandlers {
    /// Create new trade handlers
    #[must_use]
    pub fn new(ledger: Arc<TradeLedger>) -> Self {
        Self { ledger }
    }

    /// Submit trade endpoint
    pub async fn submit_trade(
        State(handlers): State<Self>,
        Json(payload): Json<Value>,
    ) -> (StatusCode, Json<ApiResponse<SubmitTradeResponse>>) {
        match handlers.ledger.submit_trade(&payload).await {
            SubmissionOutcome::Confirmed { trade } => {
                info!(
                    "Trade {} submitted successfully for user {}",
                    trade.id, trade.user_id
                );
                let response = SubmitTradeResponse {
                    trade_id: trade.id,
                    status: trade.status.as_str().to_string(),
                    message: "Trade submitted successfully".to_string(),
                };
                (StatusCode::CREATED, Json(ApiResponse::success(response)))
            }
            SubmissionOutcome::Rejected { error } => {
                let (status, error_response) = ErrorResponse::from_error(&error);
                (status, Json(ApiResponse::error(error_response)))
            }
            SubmissionOutcome::MarkedFailed { trade_id } => {
                error!("Trade {} exists but was marked failed", trade_id);
                let (status, error_response) =
                    ErrorResponse::from_error(&LedgerError::ConfirmationFailed { trade_id });
                (status, Json(ApiResponse::error(error_response)))
            }
            SubmissionOutcome::InternalError => {
                let (status, error_response) =
                    ErrorResponse::from_error(&LedgerError::Internal {
                        context: "trade submission".to_string(),
                    });
                (status, Json(ApiResponse::error(error_response)))
            }
        }
    }

    /// Per-ticker statistics endpoint
    pub async fn get_stats(
        State(handlers): State<Self>,
        Query(query): Query<UserQuery>,
    ) -> (
        StatusCode,
        Json<ApiResponse<FxHashMap<String, TickerStats>>>,
    ) {
        let Some(user_id) = query.user_id else {
            let (status, error_response) =
                ErrorResponse::from_error(&LedgerError::MissingParameter { name: "user_id" });
            return (status, Json(ApiResponse::error(error_response)));
        };

        match handlers.ledger.ticker_stats(&user_id).await {
            Ok(stats) => (StatusCode::OK, Json(ApiResponse::success(stats))),
            Err(query_error) => {
                // NotFound is a legitimate empty result, not a fault.
                if !matches!(query_error, LedgerError::NotFound { .. }) {
                    error!("Stats query failed for user {}: {}", user_id, query_error);
                }
                let (status, error_response) = ErrorResponse::from_error(&query_error);
                (status, Json(ApiResponse::error(error_response)))
            }
        }
    }

    /// Historical trades endpoint
    pub async fn get_history(
        State(handlers): State<Self>,
        Query(query): Query<UserQuery>,
    ) -> (StatusCode, Json<ApiResponse<Vec<HistoricalTrade>>>) {
        let Some(user_id) = query.user_id else {
            let (status, error_response) =
                ErrorResponse::from_error(&LedgerError::MissingParameter { name: "user_id" });
            return (status, Json(ApiResponse::error(error_response)));
        };

        match handlers.ledger.historical_trades(&user_id).await {
            Ok(trades) => {
                let history: Vec<HistoricalTrade> =
                    trades.iter().map(HistoricalTrade::from).collect();
                (StatusCode::OK, Json(ApiResponse::success(history)))
            }
            Err(query_error) => {
                if !matches!(query_error, LedgerError::NotFound { .. }) {
                    error!("History query failed for user {}: {}", user_id, query_error);
                }
                let (status, error_response) = ErrorResponse::from_error(&query_error);
                (status, Json(ApiResponse::error(error_response)))
            }
        }
    }
}
