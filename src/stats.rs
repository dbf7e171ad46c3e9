//! Per-ticker trade statistics
//!
//! A single streaming pass over a user's trades; no I/O, and the result
//! does not depend on input order.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::trade::Trade;

/// Statistics for a single ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerStats {
    /// Highest trade price seen
    pub highest_price: f64,
    /// Lowest trade price seen
    pub lowest_price: f64,
    /// Total traded volume
    pub total_volume: i64,
    /// Total traded value (sum of price * volume)
    pub total_value: f64,
    /// Volume-weighted average price
    pub vwap: f64,
}

impl TickerStats {
    /// Seed the accumulator from the ticker's first trade
    fn open(trade: &Trade) -> Self {
        Self {
            highest_price: trade.price,
            lowest_price: trade.price,
            total_volume: trade.volume,
            total_value: trade.price * trade.volume as f64,
            vwap: 0.0,
        }
    }

    fn update(&mut self, trade: &Trade) {
        self.highest_price = self.highest_price.max(trade.price);
        self.lowest_price = self.lowest_price.min(trade.price);
        self.total_volume += trade.volume;
        self.total_value += trade.price * trade.volume as f64;
    }

    fn finalize(&mut self) {
        // Volume is positive for every persisted trade; the guard covers
        // accumulators that never saw one.
        self.vwap = if self.total_volume != 0 {
            self.total_value / self.total_volume as f64
        } else {
            0.0
        };
    }
}

/// Aggregate a user's trades into per-ticker statistics
#[must_use]
pub fn aggregate_by_ticker(trades: &[Trade]) -> FxHashMap<String, TickerStats> {
    let mut stats: FxHashMap<String, TickerStats> = FxHashMap::default();

    for trade in trades {
        match stats.get_mut(&trade.ticker) {
            Some(accumulator) => accumulator.update(trade),
            None => {
                stats.insert(trade.ticker.clone(), TickerStats::open(trade));
            }
        }
    }

    for accumulator in stats.values_mut() {
        accumulator.finalize();
    }

    stats
}
