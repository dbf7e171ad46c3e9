//! Trade definitions and structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A persisted trade record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Store-assigned identifier
    pub id: i64,
    /// Owning user
    pub user_id: String,
    /// Instrument symbol
    pub ticker: String,
    /// Trade side
    pub side: TradeSide,
    /// Execution price
    pub price: f64,
    /// Traded quantity
    pub volume: i64,
    /// Store-assigned creation time
    pub timestamp: DateTime<Utc>,
    /// Lifecycle status
    pub status: TradeStatus,
}

/// A validated submission, produced by the validator before persistence
#[derive(Debug, Clone, PartialEq)]
pub struct TradeSubmission {
    /// Owning user
    pub user_id: String,
    /// Instrument symbol
    pub ticker: String,
    /// Trade side
    pub side: TradeSide,
    /// Execution price, strictly positive
    pub price: f64,
    /// Traded quantity, strictly positive
    pub volume: i64,
}

/// Trade side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl TradeSide {
    /// Wire form shared by the API and the store
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trade lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    /// Created, awaiting confirmation
    Pending,
    /// Confirmed successful
    Successful,
    /// Marked failed after creation
    Failed,
}

impl TradeStatus {
    /// Wire form shared by the API and the store
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Successful => "successful",
            Self::Failed => "failed",
        }
    }

    /// Whether no further transition can occur from this status
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Successful | Self::Failed)
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
