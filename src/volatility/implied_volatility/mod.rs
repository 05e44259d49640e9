//! Implied volatility inversion.
//!
//! Finds the σ at which a pricing oracle reproduces an observed option
//! premium, using Newton-Raphson on `price(σ) - market_price`.
//!
//! # Oracle Conventions
//!
//! A [`PricingOracle`] returns a price and a [`Sensitivities`] bundle. Vega in
//! that bundle is per 1 volatility point, so the solver multiplies it by 100
//! to get ∂price/∂σ before taking a Newton step. Theta is annualized.
//!
//! # Failure Handling
//!
//! Deep out-of-the-money strikes close to expiry routinely fail to invert:
//! vega underflows to zero ([`IVError::Stalled`]) or the iteration budget runs
//! out ([`IVError::NotConverged`]). These are ordinary results, not panics,
//! and the smile / surface aggregators simply drop such quotes.
//!
//! # Example
//!
//! ```
//! use volsmile_rs::prelude::{BlackScholes, IVParams, PricingOracle, SolverConfig, solve_iv};
//!
//! let params = IVParams::call(100.0, 100.0, 1.0, 0.05);
//! let market_price = BlackScholes.price(&params.with_volatility(0.20));
//!
//! let result = solve_iv(&params, market_price, &SolverConfig::default()).unwrap();
//! println!("IV: {:.2}%", result.iv_percent());
//! ```

mod black_scholes;
mod error;
mod solver;
mod types;

pub use black_scholes::{BlackScholes, PricingOracle, price_batch};
pub use error::IVError;
pub use solver::{SolverConfig, solve_iv, solve_iv_with};
pub use types::{IVParams, IVResult, OptionType, PricingParameters, Sensitivities};
