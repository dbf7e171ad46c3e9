//! Trade lifecycle management

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::trade::TradeStatus;

/// Trade lifecycle manager
#[derive(Debug)]
pub struct TradeLifecycle {
    /// Valid status transitions
    valid_transitions: FxHashMap<TradeStatus, Vec<TradeStatus>>,
}

impl Default for TradeLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl TradeLifecycle {
    /// Create a new lifecycle manager
    #[must_use]
    pub fn new() -> Self {
        let mut valid_transitions = FxHashMap::default();

        valid_transitions.insert(
            TradeStatus::Pending,
            vec![TradeStatus::Successful, TradeStatus::Failed],
        );

        // Terminal states have no transitions
        valid_transitions.insert(TradeStatus::Successful, vec![]);
        valid_transitions.insert(TradeStatus::Failed, vec![]);

        Self { valid_transitions }
    }

    /// Validate a status transition
    pub fn validate_transition(
        &self,
        trade_id: i64,
        current: TradeStatus,
        next: TradeStatus,
    ) -> LedgerResult<()> {
        if let Some(valid_next) = self.valid_transitions.get(&current) {
            if valid_next.contains(&next) {
                debug!("Valid transition: {} -> {}", current, next);
                return Ok(());
            }
        }

        Err(LedgerError::InvalidTransition {
            trade_id,
            from: current.to_string(),
            to: next.to_string(),
        })
    }

    /// Next statuses reachable from the given one
    #[must_use]
    pub fn valid_transitions(&self, status: TradeStatus) -> Vec<TradeStatus> {
        self.valid_transitions
            .get(&status)
            .cloned()
            .unwrap_or_default()
    }
}
