//! Typed tick subscription
//!
//! A [`TickStream`] is one subscriber's view of a simulator's output.
//! Dropping the stream unsubscribes; dropping the simulator closes every
//! stream subscribed to it.

use crate::error::FeedError;
use quotesim_core::PriceTick;
use tokio::sync::broadcast;

/// Subscription handle for a simulator's tick output
///
/// Subscribers that fall behind the channel capacity skip the missed
/// ticks and continue from the oldest retained one.
pub struct TickStream {
    rx: broadcast::Receiver<PriceTick>,
}

impl TickStream {
    pub(crate) fn new(rx: broadcast::Receiver<PriceTick>) -> Self {
        Self { rx }
    }

    /// Wait for the next tick
    pub async fn next(&mut self) -> Result<PriceTick, FeedError> {
        loop {
            match self.rx.recv().await {
                Ok(tick) => return Ok(tick),
                Err(broadcast::error::RecvError::Lagged(_)) => {
                    // Skip lagged ticks and continue
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(FeedError::ChannelClosed);
                }
            }
        }
    }

    /// Try to receive without blocking (returns None if nothing is pending)
    pub fn try_next(&mut self) -> Result<Option<PriceTick>, FeedError> {
        match self.rx.try_recv() {
            Ok(tick) => Ok(Some(tick)),
            Err(broadcast::error::TryRecvError::Empty) => Ok(None),
            Err(broadcast::error::TryRecvError::Lagged(_)) => {
                // Return None on lag, caller can retry
                Ok(None)
            }
            Err(broadcast::error::TryRecvError::Closed) => Err(FeedError::ChannelClosed),
        }
    }
}
