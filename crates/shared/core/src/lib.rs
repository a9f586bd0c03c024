//! Quotesim Core Domain
//!
//! Pure domain types for the quotesim price feed simulator.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod tick;
pub mod values;

// Re-export commonly used types at crate root
pub use tick::PriceTick;
pub use values::{Price, Symbol, Timestamp};
