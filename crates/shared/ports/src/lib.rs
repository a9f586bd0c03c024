//! Quotesim Ports
//!
//! Port definitions (traits) for the quotesim price feed simulator.
//! These define the boundaries between domain logic and infrastructure.

mod clock;

pub use clock::Clock;
