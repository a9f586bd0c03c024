//! Error types for the feed crate

use thiserror::Error;

/// Errors surfaced by tick subscriptions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// The simulator behind this stream was dropped
    #[error("Channel closed")]
    ChannelClosed,
}
