//! Price tick simulator
//!
//! Maintains a fake, continuously drifting price for each configured symbol
//! and publishes one tick per symbol on a fixed cadence.

use crate::config::SimulatorConfig;
use crate::stream::TickStream;
use log::{debug, info};
use quotesim_clock::SystemClock;
use quotesim_core::{Price, PriceTick, Symbol};
use quotesim_ports::Clock;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

const TICK_CHANNEL_CAPACITY: usize = 1000;

/// State shared between the control surface and the ticker task
struct SharedState {
    /// Unrounded running price per symbol
    prices: HashMap<Symbol, Price>,
    /// Drift source; seedable for reproducible runs
    rng: StdRng,
}

/// Timer-driven generator of synthetic price ticks
///
/// Each instance owns its price map and its schedule, so independent
/// simulators can coexist. Two states: stopped (initial) and running.
/// [`start`](Self::start) on a running instance cancels the previous
/// schedule and reinitializes state rather than erroring;
/// [`stop`](Self::stop) is idempotent.
///
/// On each timer firing, per symbol: drift uniform in [-1, +1] (scaled by
/// `drift_magnitude`) is added to the running price, the result is floored
/// at `price_floor`, and a tick carrying the running price rounded to two
/// decimal places is broadcast. The retained running price is NOT rounded,
/// so drift accumulates on the unrounded figure.
pub struct PriceTickSimulator {
    config: SimulatorConfig,
    clock: Arc<dyn Clock>,
    state: Arc<RwLock<SharedState>>,
    tick_tx: broadcast::Sender<PriceTick>,
    ticker: Option<JoinHandle<()>>,
}

impl PriceTickSimulator {
    /// Create a simulator with an entropy-seeded drift source
    pub fn new(config: SimulatorConfig) -> Self {
        Self::build(config, Arc::new(SystemClock::new()), StdRng::from_entropy())
    }

    /// Create with a specific seed for reproducible runs
    pub fn with_seed(config: SimulatorConfig, seed: u64) -> Self {
        Self::build(
            config,
            Arc::new(SystemClock::new()),
            StdRng::seed_from_u64(seed),
        )
    }

    /// Create with an injected time source
    pub fn with_clock(config: SimulatorConfig, clock: Arc<dyn Clock>) -> Self {
        Self::build(config, clock, StdRng::from_entropy())
    }

    fn build(config: SimulatorConfig, clock: Arc<dyn Clock>, rng: StdRng) -> Self {
        let (tick_tx, _) = broadcast::channel(TICK_CHANNEL_CAPACITY);

        Self {
            config,
            clock,
            state: Arc::new(RwLock::new(SharedState {
                prices: HashMap::new(),
                rng,
            })),
            tick_tx,
            ticker: None,
        }
    }

    /// Subscribe to the tick output
    ///
    /// Any number of subscribers may exist; emission is fire-and-forget.
    pub fn subscribe(&self) -> TickStream {
        TickStream::new(self.tick_tx.subscribe())
    }

    /// Whether a schedule is currently armed
    pub fn is_running(&self) -> bool {
        self.ticker.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Symbols currently tracked (empty when stopped)
    pub async fn symbols(&self) -> Vec<Symbol> {
        self.state.read().await.prices.keys().cloned().collect()
    }

    /// Current unrounded running price for a symbol, if tracked
    pub async fn price(&self, symbol: &str) -> Option<Price> {
        self.state.read().await.prices.get(symbol).copied()
    }

    /// Start (or restart) the simulation
    ///
    /// Cancels any running schedule, resets every configured symbol's
    /// running price to the baseline and arms a repeating timer. The first
    /// firing happens one full interval after this call. An empty symbol
    /// list is tolerated: the timer runs but nothing is emitted.
    pub async fn start(&mut self) {
        self.cancel_ticker();

        {
            let mut state = self.state.write().await;
            state.prices = self
                .config
                .symbols
                .iter()
                .map(|symbol| (symbol.clone(), self.config.baseline))
                .collect();
        }

        let interval = self.config.interval();
        info!(
            "starting price feed: {} symbol(s), interval {:?}",
            self.config.symbols.len(),
            interval
        );

        let state = Arc::clone(&self.state);
        let clock = Arc::clone(&self.clock);
        let tick_tx = self.tick_tx.clone();
        let drift_magnitude = self.config.drift_magnitude.abs();
        let price_floor = self.config.price_floor;

        // Arm the timer before spawning so the first firing lands exactly
        // one interval from now regardless of task scheduling.
        let mut timer = time::interval_at(Instant::now() + interval, interval);

        self.ticker = Some(tokio::spawn(async move {
            loop {
                timer.tick().await;

                let mut state = state.write().await;
                let now_ms = clock.now().timestamp_millis();
                let SharedState { prices, rng } = &mut *state;

                for (symbol, price) in prices.iter_mut() {
                    let drift: f64 = rng.gen_range(-drift_magnitude..=drift_magnitude);
                    let drift = Decimal::from_f64_retain(drift).unwrap_or_default();

                    // Floor applies to the retained price; rounding only to
                    // the emitted value.
                    *price = (*price + drift).max(price_floor);

                    let tick = PriceTick::new(symbol.clone(), *price, now_ms);
                    debug!("tick {} @ {}", tick.symbol, tick.price);
                    // No subscribers is fine, the tick is dropped
                    let _ = tick_tx.send(tick);
                }
            }
        }));
    }

    /// Replace the configuration and restart
    ///
    /// Only the new configuration's symbols tick afterwards; state for the
    /// previous symbol set is discarded.
    pub async fn restart_with(&mut self, config: SimulatorConfig) {
        self.config = config;
        self.start().await;
    }

    /// Stop the simulation
    ///
    /// Cancels the schedule if one is armed and clears all price state.
    /// Idempotent; safe to call when already stopped.
    pub async fn stop(&mut self) {
        let was_running = self.ticker.is_some();
        self.cancel_ticker();
        self.state.write().await.prices.clear();

        if was_running {
            info!("price feed stopped");
        }
    }

    /// The active configuration
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    fn cancel_ticker(&mut self) {
        // Abort lands on the timer await, never mid-emission
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

impl Drop for PriceTickSimulator {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}
