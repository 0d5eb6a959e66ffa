//! Emission simulator CLI
//!
//! Estimates how many blocks, and how much reward, each tracked pool collects
//! between a starting point on the emission curve and the start of tail
//! emission.
//!
//! # Example
//!
//! ```bash
//! # Reference scenario: pools A (30%) and B (0.3%), seeds 1..=1000
//! emission-sim
//!
//! # Custom pools, fewer runs, CSV output
//! emission-sim --pool big=0.45 --pool small=0.01 --runs 200 --format csv
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use emission_sim::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Chain height at the start of the reference scenario.
const STARTING_HEIGHT: Height = 2_082_536;

/// Supply at the start of the reference scenario
/// (17532973.286521961314 coins).
const STARTING_SUPPLY: Atomic = 17_532_973_286_521_961_314;

/// Emission simulator
///
/// Runs one simulation per seed and prints the mean and error of each pool's
/// block count and reward.
#[derive(Parser, Debug)]
#[command(name = "emission-sim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Chain height at the start of each run
    #[arg(long, default_value_t = STARTING_HEIGHT)]
    height: Height,

    /// Supply at the start of each run, in atomic units
    #[arg(long, default_value_t = STARTING_SUPPLY, conflicts_with = "supply")]
    supply_atomic: Atomic,

    /// Supply at the start of each run, in coins
    #[arg(long, value_parser = parse_coins)]
    supply: Option<f64>,

    /// Tail emission reward, in coins
    #[arg(long, default_value_t = 0.6, value_parser = parse_coins)]
    floor: f64,

    /// Tracked pool as NAME=SHARE, in lottery order (repeatable).
    /// Defaults to A=0.3 and B=0.003.
    #[arg(long = "pool", value_parser = parse_pool)]
    pools: Vec<(String, PowerValue)>,

    /// Number of simulation runs
    #[arg(short, long, default_value_t = 1000)]
    runs: u64,

    /// Seed of the first run; runs use consecutive seeds
    #[arg(long, default_value_t = 1)]
    first_seed: u64,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,

    /// Include network-wide statistics
    #[arg(long)]
    network: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Summary,
    Pretty,
    Csv,
}

impl From<OutputFormat> for Format {
    fn from(value: OutputFormat) -> Self {
        match value {
            OutputFormat::Summary => Format::Summary,
            OutputFormat::Pretty => Format::PrettyPrint,
            OutputFormat::Csv => Format::CSV,
        }
    }
}

fn parse_pool(s: &str) -> Result<(String, PowerValue), String> {
    let (name, share) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=SHARE, got {s:?}"))?;
    if name.is_empty() {
        return Err("pool name cannot be empty".into());
    }
    let share = share
        .parse()
        .map_err(|e| format!("invalid share {share:?}: {e}"))?;

    Ok((name.to_string(), share))
}

fn parse_coins(s: &str) -> Result<f64, String> {
    let amount: f64 =
        s.parse().map_err(|e| format!("invalid amount {s:?}: {e}"))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(format!("amount must be a non-negative number, got {s}"));
    }

    Ok(amount)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,emission_sim=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let pools = if args.pools.is_empty() {
        vec![("A".to_string(), 0.3), ("B".to_string(), 0.003)]
    } else {
        args.pools
    };
    let supply = args.supply.map(coins).unwrap_or(args.supply_atomic);
    let last_seed = args
        .first_seed
        .checked_add(args.runs.saturating_sub(1))
        .context("seed range overflows u64")?;

    info!(
        height = args.height,
        supply,
        floor = args.floor,
        runs = args.runs,
        first_seed = args.first_seed,
        "configuring simulation"
    );

    let mut builder = SimulationBuilder::new()
        .starting_height(args.height)
        .starting_supply(supply)
        .curve(RewardCurve::with_floor(coins(args.floor)));
    builder = if args.runs == 0 {
        builder.runs(0)
    } else {
        builder.seeds(args.first_seed..=last_seed)
    };
    for (name, share) in pools {
        builder = builder.add_miner(name, share);
    }

    let group = builder.build().context("invalid simulation configuration")?;
    let results = group.run_all();

    let mut results = results.format(args.format.into());
    if args.network {
        results = results.network();
    }

    println!("{}", results.build());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_coins, parse_pool};

    #[test]
    fn parses_pools() {
        assert_eq!(parse_pool("A=0.3"), Ok(("A".to_string(), 0.3)));
        assert!(parse_pool("A").is_err());
        assert!(parse_pool("=0.3").is_err());
        assert!(parse_pool("A=abc").is_err());
    }

    #[test]
    fn parses_coin_amounts() {
        assert_eq!(parse_coins("0.6"), Ok(0.6));
        assert_eq!(parse_coins("0"), Ok(0.0));
        assert!(parse_coins("-1.5").is_err());
        assert!(parse_coins("NaN").is_err());
        assert!(parse_coins("inf").is_err());
        assert!(parse_coins("abc").is_err());
    }
}
