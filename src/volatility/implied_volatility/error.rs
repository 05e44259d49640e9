//! Error types for implied volatility calculation.

use std::fmt;

/// Per-quote solver failures.
///
/// These are routine outcomes for deep out-of-the-money or stale quotes.
/// Aggregators drop the quote and carry on.
#[derive(Debug, Clone, PartialEq)]
pub enum IVError {
    /// Vega vanished, so no Newton step can be taken.
    Stalled {
        /// Iteration at which the derivative fell below the threshold.
        iteration: u32,
        /// Volatility estimate at that point.
        sigma: f64,
    },

    /// Iteration budget exhausted without matching the market price.
    NotConverged {
        /// Number of iterations attempted.
        iterations: u32,
        /// Last volatility estimate.
        last_sigma: f64,
        /// |model price - market price| at the last estimate.
        residual: f64,
    },

    /// Market price or contract terms are not finite numbers.
    InvalidParams {
        /// Description of the invalid parameter.
        message: String,
    },
}

impl IVError {
    /// Short machine-friendly name of the failure, used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            IVError::Stalled { .. } => "stalled",
            IVError::NotConverged { .. } => "not_converged",
            IVError::InvalidParams { .. } => "invalid_params",
        }
    }
}

impl fmt::Display for IVError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IVError::Stalled { iteration, sigma } => {
                write!(
                    f,
                    "solver stalled: vega is zero at iteration {iteration} (sigma={sigma:.6}), option is likely deep out of the money near expiry"
                )
            }
            IVError::NotConverged {
                iterations,
                last_sigma,
                residual,
            } => {
                write!(
                    f,
                    "solver did not converge after {iterations} iterations, last sigma: {last_sigma:.6}, price residual: {residual:.2e}"
                )
            }
            IVError::InvalidParams { message } => {
                write!(f, "invalid parameters: {message}")
            }
        }
    }
}

impl std::error::Error for IVError {}
