//! REST API models and request/response types

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::LedgerMetricsSnapshot;
use crate::error::LedgerError;
use crate::trade::Trade;

/// Response for a confirmed trade submission
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitTradeResponse {
    /// Store-assigned trade ID
    pub trade_id: i64,
    /// Terminal status of the persisted record
    pub status: String,
    /// Status message
    pub message: String,
}

/// One entry of a user's trade history
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoricalTrade {
    /// Store-assigned creation time
    pub timestamp: DateTime<Utc>,
    /// Instrument symbol
    pub ticker: String,
    /// Trade side
    pub side: String,
    /// Execution price
    pub price: f64,
    /// Traded quantity
    pub volume: i64,
    /// Lifecycle status of the record
    pub status: String,
}

impl From<&Trade> for HistoricalTrade {
    fn from(trade: &Trade) -> Self {
        Self {
            timestamp: trade.timestamp,
            ticker: trade.ticker.clone(),
            side: trade.side.as_str().to_string(),
            price: trade.price,
            volume: trade.volume,
            status: trade.status.as_str().to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Service version
    pub version: String,
    /// Service uptime in seconds
    pub uptime_seconds: u64,
    /// Ledger counters
    pub metrics: LedgerMetricsSnapshot,
}

/// Error response model
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details
    pub details: Option<FxHashMap<String, String>>,
}

impl ErrorResponse {
    /// Map a domain error to its HTTP status, stable code, and payload.
    ///
    /// Client errors carry their message verbatim so the caller can
    /// correct the request; internal faults stay generic.
    #[must_use]
    pub fn from_error(error: &LedgerError) -> (StatusCode, Self) {
        let (status, code) = match error {
            LedgerError::MissingField { .. } => (StatusCode::BAD_REQUEST, "MISSING_FIELD"),
            LedgerError::InvalidNumeric { .. } => (StatusCode::BAD_REQUEST, "INVALID_NUMERIC"),
            LedgerError::InvalidEnum { .. } => (StatusCode::BAD_REQUEST, "INVALID_ENUM"),
            LedgerError::MissingParameter { .. } => (StatusCode::BAD_REQUEST, "MISSING_PARAMETER"),
            LedgerError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            LedgerError::ConfirmationFailed { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIRMATION_FAILED")
            }
            LedgerError::InvalidTransition { .. }
            | LedgerError::Persistence(_)
            | LedgerError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let message = if code == "INTERNAL_ERROR" {
            "Internal server error".to_string()
        } else {
            error.to_string()
        };

        let details = match error {
            LedgerError::MissingField { field }
            | LedgerError::InvalidNumeric { field }
            | LedgerError::InvalidEnum { field, .. } => Some(FxHashMap::from_iter([(
                "field".to_string(),
                (*field).to_string(),
            )])),
            _ => None,
        };

        (
            status,
            Self {
                error: code.to_string(),
                message,
                details,
            },
        )
    }
}

/// Generic API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    pub data: Option<T>,
    /// Error details (if failed)
    pub error: Option<ErrorResponse>,
    /// Response timestamp
    pub timestamp: i64,
}

impl<T> ApiResponse<T> {
    /// Create a successful API response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Create an error API response
    #[must_use]
    pub fn error(error: ErrorResponse) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}
