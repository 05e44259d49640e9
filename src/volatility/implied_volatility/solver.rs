//! Newton-Raphson inversion of a pricing oracle.
//!
//! Every step is clamped into the configured volatility bounds, so the
//! returned σ, and the one reported on failure, always lies inside them.

use super::black_scholes::{BlackScholes, PricingOracle};
use super::error::IVError;
use super::types::{IVParams, IVResult};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Configuration for the Newton-Raphson solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum iterations before giving up.
    pub max_iterations: u32,
    /// Convergence tolerance on |model price - market price|.
    pub tolerance: f64,
    /// Initial IV guess (default: 0.20 = 20%).
    pub initial_guess: f64,
    /// Minimum IV bound (default: 1e-6).
    pub min_iv: f64,
    /// Maximum IV bound (default: 10.0 = 1000%).
    pub max_iv: f64,
    /// Smallest |dPrice/dσ| the solver will divide by.
    pub min_vega: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-6,
            initial_guess: 0.20,
            min_iv: 1e-6,
            max_iv: 10.0,
            min_vega: 1e-14,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the initial IV guess.
    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    /// Sets the IV bounds.
    #[must_use]
    pub fn with_bounds(mut self, min_iv: f64, max_iv: f64) -> Self {
        self.min_iv = min_iv;
        self.max_iv = max_iv;
        self
    }
}

fn validate_inputs(
    params: &IVParams,
    market_price: f64,
    config: &SolverConfig,
) -> Result<(), IVError> {
    let bounds_ok = config.min_iv.is_finite()
        && config.max_iv.is_finite()
        && config.min_iv <= config.max_iv;
    if !bounds_ok {
        return Err(IVError::InvalidParams {
            message: format!(
                "volatility bounds must be finite with min <= max, got [{}, {}]",
                config.min_iv, config.max_iv
            ),
        });
    }
    if !market_price.is_finite() {
        return Err(IVError::InvalidParams {
            message: format!("market price must be finite, got {market_price}"),
        });
    }
    if !params.is_finite() {
        return Err(IVError::InvalidParams {
            message: format!(
                "spot, strike, time and rate must be finite, got S={} K={} T={} r={}",
                params.spot, params.strike, params.time_to_expiry, params.risk_free_rate
            ),
        });
    }
    Ok(())
}

/// Solves for implied volatility using Newton-Raphson against any oracle.
///
/// The method iteratively refines the IV estimate using:
/// σ_{n+1} = clamp(σ_n - (price(σ_n) - market_price) / vega(σ_n), min_iv, max_iv)
///
/// # Arguments
/// - `oracle`: Pricing model to invert
/// - `params`: Option contract terms (spot, strike, time, rate, type)
/// - `market_price`: Observed market price to match
/// - `config`: Solver configuration
///
/// # Returns
/// - `Ok(IVResult)`: Converged IV; always within `[min_iv, max_iv]`
/// - `Err(IVError::Stalled)`: vega vanished before convergence
/// - `Err(IVError::NotConverged)`: iteration budget exhausted
pub fn solve_iv_with<O: PricingOracle + ?Sized>(
    oracle: &O,
    params: &IVParams,
    market_price: f64,
    config: &SolverConfig,
) -> Result<IVResult, IVError> {
    validate_inputs(params, market_price, config)?;

    let mut sigma = config.initial_guess.clamp(config.min_iv, config.max_iv);
    let mut residual = f64::NAN;

    for iteration in 0..config.max_iterations {
        let priced = params.with_volatility(sigma);
        let diff = oracle.price(&priced) - market_price;
        residual = diff.abs();

        if residual < config.tolerance {
            trace!(
                "IV converged: K={} sigma={:.6} after {} iterations",
                params.strike, sigma, iteration
            );
            return Ok(IVResult::new(sigma, iteration, residual));
        }

        let dprice_dsigma = oracle.sensitivities(&priced).dprice_dsigma();

        // must precede the division below
        if dprice_dsigma.is_nan() || dprice_dsigma.abs() < config.min_vega {
            trace!(
                "IV stalled: K={} sigma={:.6} at iteration {}",
                params.strike, sigma, iteration
            );
            return Err(IVError::Stalled { iteration, sigma });
        }

        sigma = (sigma - diff / dprice_dsigma).clamp(config.min_iv, config.max_iv);
    }

    trace!(
        "IV did not converge: K={} last sigma={:.6} residual={:.2e}",
        params.strike, sigma, residual
    );
    Err(IVError::NotConverged {
        iterations: config.max_iterations,
        last_sigma: sigma,
        residual,
    })
}

/// Solves for implied volatility with the Black-Scholes oracle.
///
/// # Example
/// ```
/// use volsmile_rs::prelude::{IVParams, SolverConfig, solve_iv};
///
/// let params = IVParams::call(100.0, 100.0, 1.0, 0.05);
/// let result = solve_iv(&params, 10.4506, &SolverConfig::default()).unwrap();
/// assert!((result.iv - 0.20).abs() < 1e-4);
/// ```
pub fn solve_iv(
    params: &IVParams,
    market_price: f64,
    config: &SolverConfig,
) -> Result<IVResult, IVError> {
    solve_iv_with(&BlackScholes, params, market_price, config)
}
