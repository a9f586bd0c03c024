//! Quotesim Feed
//!
//! Synthetic market-data feed for demo and test consumers that have no live
//! price source. A [`PriceTickSimulator`] maintains a fake, continuously
//! drifting price per symbol and broadcasts one [`PriceTick`] per symbol on a
//! fixed cadence.
//!
//! ## Architecture
//!
//! ```text
//! SimulatorConfig ──► PriceTickSimulator ──► broadcast ──► TickStream (N)
//!                       │  price map           channel
//!                       └─ ticker task (one per started instance)
//! ```
//!
//! Each simulator is an owned instance with its own price map and schedule;
//! independent instances coexist and are disposed by dropping them. `start`
//! on a running instance cancels the previous schedule and reinitializes
//! state rather than erroring.
//!
//! [`PriceTick`]: quotesim_core::PriceTick

pub mod config;
pub mod error;
pub mod simulator;
pub mod stream;

// Re-export commonly used types
pub use config::{MIN_INTERVAL_MS, SimulatorConfig};
pub use error::FeedError;
pub use simulator::PriceTickSimulator;
pub use stream::TickStream;
