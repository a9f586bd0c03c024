//! Price tick message type

use crate::values::{Price, Symbol};
use serde::{Deserialize, Serialize};

/// One synthetic price update for one symbol at one point in time
///
/// The published price is rounded to two decimal places at construction.
/// The simulator's retained running price is not rounded, so drift
/// accumulates on the unrounded figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTick {
    pub symbol: Symbol,
    pub price: Price,
    /// Emission time in epoch milliseconds
    pub timestamp_ms: i64,
}

impl PriceTick {
    /// Create a new tick, rounding the price to two decimal places
    pub fn new(symbol: impl Into<Symbol>, price: Price, timestamp_ms: i64) -> Self {
        Self {
            symbol: symbol.into(),
            price: price.round_dp(2),
            timestamp_ms,
        }
    }
}
