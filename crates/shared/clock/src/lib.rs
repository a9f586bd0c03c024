//! Quotesim Clock Infrastructure
//!
//! Provides time sources for the feed simulator:
//!
//! - [`SystemClock`] - real wall-clock time for production use
//! - [`ManualClock`] - fixed time advanced explicitly, for deterministic tests
//!
//! ## Usage
//!
//! ```ignore
//! use quotesim_clock::{Clock, ManualClock};
//! use chrono::Duration;
//!
//! let clock = ManualClock::starting_now();
//! let t1 = clock.now();
//! clock.advance(Duration::seconds(5));
//! assert_eq!(clock.now() - t1, Duration::seconds(5));
//! ```

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use quotesim_ports::Clock;
