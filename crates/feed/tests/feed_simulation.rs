//! Integration tests: simulator timing and emission behavior
//!
//! Runs on tokio's paused clock so timer firings are deterministic: time
//! only moves when the test advances it.

use chrono::{TimeZone, Utc};
use quotesim_clock::ManualClock;
use quotesim_core::PriceTick;
use quotesim_feed::{FeedError, PriceTickSimulator, SimulatorConfig, TickStream};
use rust_decimal_macros::dec;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::{self, Duration};

/// Let the spawned ticker task run until it has processed all due firings
async fn settle() {
    for _ in 0..50 {
        tokio::task::yield_now().await;
    }
}

fn drain(stream: &mut TickStream) -> Vec<PriceTick> {
    let mut ticks = Vec::new();
    while let Ok(Some(tick)) = stream.try_next() {
        ticks.push(tick);
    }
    ticks
}

#[tokio::test(start_paused = true)]
async fn test_first_tick_within_one_drift_of_baseline() {
    let _ = env_logger::try_init();

    let config = SimulatorConfig::new(vec!["F0001".to_string()], 100);
    let mut sim = PriceTickSimulator::with_seed(config, 42);
    let mut stream = sim.subscribe();

    sim.start().await;
    settle().await;

    // First firing lands at +100ms, the next at +200ms
    time::advance(Duration::from_millis(110)).await;
    settle().await;

    let ticks = drain(&mut stream);
    assert_eq!(ticks.len(), 1);
    assert_eq!(ticks[0].symbol, "F0001");
    assert!(ticks[0].price >= dec!(99) && ticks[0].price <= dec!(101));
}

#[tokio::test(start_paused = true)]
async fn test_emitted_price_never_below_floor() {
    // Start right above the floor so negative drift pushes against it
    let mut config = SimulatorConfig::new(vec!["F0001".to_string()], 10);
    config.baseline = dec!(1.5);

    let mut sim = PriceTickSimulator::with_seed(config, 1);
    let mut stream = sim.subscribe();

    sim.start().await;
    settle().await;

    for _ in 0..50 {
        time::advance(Duration::from_millis(10)).await;
        settle().await;
    }

    let ticks = drain(&mut stream);
    assert_eq!(ticks.len(), 50);
    for tick in &ticks {
        assert!(tick.price >= dec!(1), "price {} fell below floor", tick.price);
    }
}

#[tokio::test(start_paused = true)]
async fn test_exactly_three_firings_in_350ms() {
    let config = SimulatorConfig::new(vec!["F0001".to_string()], 100);
    let mut sim = PriceTickSimulator::with_seed(config, 3);
    let mut stream = sim.subscribe();

    sim.start().await;
    settle().await;

    // Timer fires at 100/200/300ms
    time::advance(Duration::from_millis(350)).await;
    settle().await;

    assert_eq!(drain(&mut stream).len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_two_symbols_one_tick_each_then_stop() {
    let config = SimulatorConfig::new(vec!["AAA".to_string(), "BBB".to_string()], 50);
    let mut sim = PriceTickSimulator::with_seed(config, 9);
    let mut stream = sim.subscribe();

    sim.start().await;
    settle().await;

    time::advance(Duration::from_millis(50)).await;
    settle().await;

    let ticks = drain(&mut stream);
    assert_eq!(ticks.len(), 2);
    let symbols: HashSet<_> = ticks.iter().map(|t| t.symbol.clone()).collect();
    assert!(symbols.contains("AAA") && symbols.contains("BBB"));
    for tick in &ticks {
        assert!(tick.price >= dec!(1));
    }

    sim.stop().await;
    assert!(sim.symbols().await.is_empty());

    // No further emissions once stopped
    time::advance(Duration::from_millis(200)).await;
    settle().await;
    assert!(drain(&mut stream).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_restart_switches_symbol_set() {
    let mut sim =
        PriceTickSimulator::with_seed(SimulatorConfig::new(vec!["AAA".to_string()], 100), 5);
    let mut stream = sim.subscribe();

    sim.start().await;
    settle().await;
    time::advance(Duration::from_millis(100)).await;
    settle().await;

    let first = drain(&mut stream);
    assert!(first.iter().all(|t| t.symbol == "AAA"));

    sim.restart_with(SimulatorConfig::new(vec!["BBB".to_string()], 100))
        .await;
    settle().await;
    time::advance(Duration::from_millis(300)).await;
    settle().await;

    let second = drain(&mut stream);
    assert!(!second.is_empty());
    assert!(
        second.iter().all(|t| t.symbol == "BBB"),
        "ticks for the old symbol set after restart"
    );
    assert_eq!(sim.symbols().await, vec!["BBB".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_ticks_carry_injected_clock_time() {
    let epoch = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let clock = Arc::new(ManualClock::new(epoch));

    let config = SimulatorConfig::new(vec!["F0001".to_string()], 100);
    let mut sim = PriceTickSimulator::with_clock(config, clock);
    let mut stream = sim.subscribe();

    sim.start().await;
    settle().await;
    time::advance(Duration::from_millis(100)).await;
    settle().await;

    let ticks = drain(&mut stream);
    assert_eq!(ticks.len(), 1);
    assert_eq!(ticks[0].timestamp_ms, epoch.timestamp_millis());
}

#[tokio::test(start_paused = true)]
async fn test_multiple_subscribers_all_receive() {
    let config = SimulatorConfig::new(vec!["F0001".to_string()], 100);
    let mut sim = PriceTickSimulator::with_seed(config, 11);
    let mut sub1 = sim.subscribe();
    let mut sub2 = sim.subscribe();

    sim.start().await;
    settle().await;
    time::advance(Duration::from_millis(100)).await;
    settle().await;

    let from1 = drain(&mut sub1);
    let from2 = drain(&mut sub2);
    assert_eq!(from1.len(), 1);
    assert_eq!(from1, from2);
}

#[tokio::test]
async fn test_dropping_simulator_closes_streams() {
    let sim = PriceTickSimulator::new(SimulatorConfig::default());
    let mut stream = sim.subscribe();

    drop(sim);

    assert_eq!(stream.try_next(), Err(FeedError::ChannelClosed));
}

#[tokio::test(start_paused = true)]
async fn test_independent_instances_coexist() {
    let mut sim_a = PriceTickSimulator::with_seed(
        SimulatorConfig::new(vec!["AAA".to_string()], 100),
        21,
    );
    let mut sim_b = PriceTickSimulator::with_seed(
        SimulatorConfig::new(vec!["BBB".to_string()], 100),
        22,
    );
    let mut stream_a = sim_a.subscribe();
    let mut stream_b = sim_b.subscribe();

    sim_a.start().await;
    sim_b.start().await;
    settle().await;
    time::advance(Duration::from_millis(100)).await;
    settle().await;

    // Stopping one instance must not disturb the other
    sim_a.stop().await;
    time::advance(Duration::from_millis(100)).await;
    settle().await;

    let from_a = drain(&mut stream_a);
    let from_b = drain(&mut stream_b);
    assert_eq!(from_a.len(), 1);
    assert_eq!(from_b.len(), 2);
    assert!(from_a.iter().all(|t| t.symbol == "AAA"));
    assert!(from_b.iter().all(|t| t.symbol == "BBB"));
}
