//! # volsmile-rs
//!
//! Recovers market-implied volatility from European option quotes and
//! assembles it into smile and surface views.
//!
//! ## Pipeline
//!
//! 1. **Quote filter**: drop inactive quotes, quotes with a spread wider than
//!    50% of the ask, and strikes outside ±20% of spot.
//! 2. **Implied volatility solver**: Newton-Raphson on
//!    `price(σ) - market_price`, starting at σ = 20%, clamped to
//!    `[1e-6, 10]` every step. Stalls and non-convergence are ordinary
//!    results that the aggregators drop.
//! 3. **Expiry selector**: one listed expiry per target horizon
//!    (30/60/90/180 days by default) within ±20 days, never reused.
//! 4. **Smile**: calls and puts merged by strike plus an interpolated
//!    at-the-money volatility.
//! 5. **Surface**: one out-of-the-money volatility per strike, strikes
//!    intersected across expiries into a fully populated grid.
//!
//! ## Example
//!
//! ```
//! use volsmile_rs::prelude::*;
//!
//! let oracle = BlackScholes;
//! let spot = 100.0;
//! let time = 0.25;
//! let calls: Vec<Quote> = [95.0, 100.0, 105.0]
//!     .iter()
//!     .map(|&strike| {
//!         let mid = oracle.price(&IVParams::call(spot, strike, time, 0.05).with_volatility(0.2));
//!         Quote::call(strike, mid - 0.02, mid + 0.02)
//!     })
//!     .collect();
//!
//! let smile = build_smile(&calls, &[], spot, time, 0.05).unwrap();
//! assert!((smile.atm_iv() - 0.2).abs() < 1e-3);
//! ```

pub mod utils;
pub mod volatility;

pub mod prelude;
