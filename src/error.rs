//! Error types for the trade ledger

use thiserror::Error;

/// Ledger-specific error types
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A required submission field was absent
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the absent field
        field: &'static str,
    },

    /// A numeric field was not a strictly positive number
    #[error("{field} must be a positive number")]
    InvalidNumeric {
        /// Name of the offending field
        field: &'static str,
    },

    /// A field value was outside its permitted set of values
    #[error("Invalid {field}: {expected}")]
    InvalidEnum {
        /// Name of the offending field
        field: &'static str,
        /// Description of the permitted values
        expected: &'static str,
    },

    /// A required query parameter was absent
    #[error("Missing {name} parameter")]
    MissingParameter {
        /// Name of the absent parameter
        name: &'static str,
    },

    /// No trades exist for the requested user
    #[error("No trades found for user {user_id}")]
    NotFound {
        /// The user whose trades were requested
        user_id: String,
    },

    /// A status change violated the lifecycle transition table
    #[error("Trade {trade_id} cannot transition from {from} to {to}")]
    InvalidTransition {
        /// Identifier of the trade
        trade_id: i64,
        /// Status the trade currently holds
        from: String,
        /// Status the transition attempted to reach
        to: String,
    },

    /// Store-layer failure
    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    /// The record was created durably but could not be confirmed
    #[error("Trade {trade_id} could not be confirmed and was marked failed")]
    ConfirmationFailed {
        /// Identifier of the durable failed record
        trade_id: i64,
    },

    /// Unexpected internal fault; details are logged, not surfaced
    #[error("Internal error: {context}")]
    Internal {
        /// Context for the log line
        context: String,
    },
}

/// Type alias for ledger results
pub type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    /// Whether the caller must correct the request before retrying
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::InvalidNumeric { .. }
                | Self::InvalidEnum { .. }
                | Self::MissingParameter { .. }
        )
    }
}
