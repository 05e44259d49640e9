//! Builds a volatility smile from a synthetic skewed option chain.
//!
//! Run with `RUST_LOG=debug` to see per-quote filtering decisions.

use tracing::info;
use volsmile_rs::prelude::*;

const SPOT: f64 = 100.0;
const RATE: f64 = 0.05;
const DAYS: i64 = 30;

/// Downward skew with some curvature.
fn skew(strike: f64) -> f64 {
    let m = (strike / SPOT).ln();
    0.22 - 0.3 * m + 1.2 * m * m
}

fn quotes(option_type: OptionType, strikes: &[f64]) -> Vec<Quote> {
    strikes
        .iter()
        .map(|&strike| {
            let params = IVParams::new(SPOT, strike, year_fraction(DAYS), RATE, option_type);
            let mid = BlackScholes.price(&params.with_volatility(skew(strike)));
            let half_spread = (0.02 * mid).max(0.01);
            Quote::new(strike, mid - half_spread, mid + half_spread, option_type)
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let strikes: Vec<f64> = (0..21).map(|i| 75.0 + 2.5 * i as f64).collect();
    let calls = quotes(OptionType::Call, &strikes);
    let puts = quotes(OptionType::Put, &strikes);
    info!("synthetic chain: {} strikes, {} days out", strikes.len(), DAYS);

    let smile = build_smile(&calls, &puts, SPOT, year_fraction(DAYS), RATE)?;

    println!("{:>8}  {:>4}  {:>8}", "strike", "type", "iv %");
    for point in smile.points() {
        let label = match point.option_type {
            OptionType::Call => "C",
            OptionType::Put => "P",
        };
        println!("{:>8.2}  {:>4}  {:>8.2}", point.strike, label, point.iv * 100.0);
    }
    println!("ATM IV: {:.2}%", smile.atm_iv_percent());

    Ok(())
}
