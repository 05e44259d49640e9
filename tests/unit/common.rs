//! Synthetic option chains priced off a known volatility smile.

use chrono::{Days, NaiveDate};
use volsmile_rs::prelude::*;

pub const SPOT: f64 = 100.0;
pub const RATE: f64 = 0.05;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

pub fn days_out(days: u64) -> NaiveDate {
    today().checked_add_days(Days::new(days)).unwrap()
}

/// Skewed smile with a mild upward term structure, as a decimal.
pub fn model_vol(strike: f64, days: i64) -> f64 {
    let m = (strike / SPOT).ln();
    0.20 - 0.25 * m + 0.8 * m * m + 0.01 * days as f64 / 365.0
}

/// Quote whose mid is the model price at `model_vol`.
pub fn model_quote(option_type: OptionType, strike: f64, days: i64) -> Quote {
    let params = IVParams::new(SPOT, strike, year_fraction(days), RATE, option_type);
    let mid = BlackScholes.price(&params.with_volatility(model_vol(strike, days)));
    let half_spread = (0.01 * mid).max(0.005);
    Quote::new(strike, mid - half_spread, mid + half_spread, option_type)
}

fn row(quote: Quote) -> ChainRow {
    ChainRow {
        strike: quote.strike,
        bid: quote.bid,
        ask: quote.ask,
    }
}

/// Chain with calls and puts at every strike.
pub fn model_chain(days: i64, strikes: &[f64]) -> ExpiryChain {
    ExpiryChain {
        expiry: days_out(days as u64),
        chain: OptionChain {
            calls: strikes
                .iter()
                .map(|&k| row(model_quote(OptionType::Call, k, days)))
                .collect(),
            puts: strikes
                .iter()
                .map(|&k| row(model_quote(OptionType::Put, k, days)))
                .collect(),
        },
    }
}

/// Strikes 80, 85, ..., 120.
pub fn standard_strikes() -> Vec<f64> {
    (0..9).map(|i| 80.0 + 5.0 * i as f64).collect()
}
