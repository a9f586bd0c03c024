//! Quotesim Runner
//!
//! Drives a [`PriceTickSimulator`] with a configuration loaded from a JSON
//! file (or the defaults) and logs every emitted tick until ctrl-c, or until
//! a requested number of timer firings has elapsed.

use log::{error, info};
use quotesim_feed::{PriceTickSimulator, SimulatorConfig};

fn print_help() {
    eprintln!(
        r#"Quotesim Runner - synthetic price tick feed

USAGE:
    quotesim-runner [OPTIONS]

OPTIONS:
    --config <PATH>     Load simulator configuration from a JSON file
    --ticks <N>         Stop after N timer firings (default: run until ctrl-c)
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

EXAMPLES:
    # Run with defaults (symbol F0001, one tick every 2s)
    quotesim-runner

    # Run with config file
    quotesim-runner --config config.json

    # Ten firings, then exit
    quotesim-runner --ticks 10
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut max_firings: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            "--ticks" | "-t" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --ticks requires a number");
                    std::process::exit(1);
                }
                max_firings = Some(args[i].parse()?);
            }
            other => {
                eprintln!("Error: unknown option '{other}'");
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)?;
            let config: SimulatorConfig = serde_json::from_str(&raw)?;
            info!("loaded configuration from {path}");
            config
        }
        None => SimulatorConfig::default(),
    };

    // One firing emits one tick per symbol
    let ticks_per_firing = config.symbols.len() as u64;
    let tick_budget = max_firings.map(|n| n * ticks_per_firing);

    let mut sim = PriceTickSimulator::new(config);
    let mut stream = sim.subscribe();
    sim.start().await;

    let mut received: u64 = 0;
    loop {
        tokio::select! {
            tick = stream.next() => match tick {
                Ok(tick) => {
                    info!("{} {} @ {}", tick.timestamp_ms, tick.symbol, tick.price);
                    received += 1;
                    if tick_budget.is_some_and(|budget| received >= budget) {
                        break;
                    }
                }
                Err(e) => {
                    error!("tick stream ended: {e}");
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("ctrl-c received, shutting down");
                break;
            }
        }
    }

    sim.stop().await;
    Ok(())
}
