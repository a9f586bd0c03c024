//! Simulator configuration

use quotesim_core::{Price, Symbol};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Minimum effective tick interval in milliseconds
///
/// A zero interval is clamped here instead of inheriting whatever the
/// timer primitive does with it.
pub const MIN_INTERVAL_MS: u64 = 1;

/// Configuration for a price tick simulator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Symbols to generate ticks for
    pub symbols: Vec<Symbol>,
    /// Tick interval in milliseconds
    pub interval_ms: u64,
    /// Starting price assigned to every symbol on start
    pub baseline: Price,
    /// Per-tick drift is uniform in [-drift_magnitude, +drift_magnitude]
    pub drift_magnitude: f64,
    /// Running prices never fall below this
    pub price_floor: Price,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            symbols: vec!["F0001".to_string()],
            interval_ms: 2000,
            baseline: dec!(100),
            drift_magnitude: 1.0,
            price_floor: dec!(1),
        }
    }
}

impl SimulatorConfig {
    /// Convenience constructor for the common symbols + interval case
    pub fn new(symbols: Vec<Symbol>, interval_ms: u64) -> Self {
        Self {
            symbols,
            interval_ms,
            ..Self::default()
        }
    }

    /// The effective tick interval, clamped to [`MIN_INTERVAL_MS`]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(MIN_INTERVAL_MS))
    }
}
