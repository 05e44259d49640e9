//! Black-Scholes pricing model and Greeks calculation.
//!
//! This module provides the pricing oracle seam used by the solver and a
//! closed-form Black-Scholes implementation of it for European options.

use super::types::{OptionType, PricingParameters, Sensitivities};
use statrs::function::erf::erfc;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Closed-form pricer the IV solver inverts.
///
/// Implementations must be deterministic and side-effect free. Vega is
/// reported per 1 volatility point and theta per year, matching
/// [`Sensitivities`].
pub trait PricingOracle {
    /// Theoretical option price.
    fn price(&self, params: &PricingParameters) -> f64;

    /// Delta, gamma, vega and theta at the given parameters.
    fn sensitivities(&self, params: &PricingParameters) -> Sensitivities;
}

/// Black-Scholes pricing model implementation.
///
/// Provides methods for calculating option prices and Greeks
/// using the Black-Scholes-Merton formula (no dividends).
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackScholes;

impl BlackScholes {
    /// Standard normal cumulative distribution function (CDF).
    ///
    /// Computed through the complementary error function so that the far
    /// tails keep full relative precision.
    #[must_use]
    pub fn norm_cdf(x: f64) -> f64 {
        0.5 * erfc(-x * FRAC_1_SQRT_2)
    }

    /// Standard normal probability density function (PDF).
    #[must_use]
    pub fn norm_pdf(x: f64) -> f64 {
        (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
    }

    /// Calculates the d1 parameter of the Black-Scholes formula.
    ///
    /// d1 = [ln(S/K) + (r + σ²/2)T] / (σ√T)
    #[must_use]
    pub fn d1(spot: f64, strike: f64, rate: f64, time: f64, vol: f64) -> f64 {
        let sqrt_time = time.sqrt();
        ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * sqrt_time)
    }

    /// Calculates the d2 parameter of the Black-Scholes formula.
    ///
    /// d2 = d1 - σ√T
    #[must_use]
    pub fn d2(d1: f64, vol: f64, time: f64) -> f64 {
        d1 - vol * time.sqrt()
    }

    /// Value of the option when no randomness is left (T ≤ 0 or σ ≤ 0).
    fn degenerate_price(params: &PricingParameters) -> f64 {
        if params.time_to_expiry <= 0.0 {
            return params.contract().intrinsic_value();
        }
        let discount = (-params.risk_free_rate * params.time_to_expiry).exp();
        match params.option_type {
            OptionType::Call => (params.spot - params.strike * discount).max(0.0),
            OptionType::Put => (params.strike * discount - params.spot).max(0.0),
        }
    }

    /// Delta at expiry or with zero volatility: a step function of moneyness.
    fn degenerate_delta(params: &PricingParameters) -> f64 {
        let discount = (-params.risk_free_rate * params.time_to_expiry.max(0.0)).exp();
        let forward_itm = params.spot > params.strike * discount;
        match params.option_type {
            OptionType::Call if forward_itm => 1.0,
            OptionType::Call => 0.0,
            OptionType::Put if forward_itm => 0.0,
            OptionType::Put => -1.0,
        }
    }
}

impl PricingOracle for BlackScholes {
    /// For calls: C = S·N(d1) - K·e^(-rT)·N(d2)
    /// For puts:  P = K·e^(-rT)·N(-d2) - S·N(-d1)
    fn price(&self, params: &PricingParameters) -> f64 {
        if params.time_to_expiry <= 0.0 || params.volatility <= 0.0 {
            return Self::degenerate_price(params);
        }

        let d1 = Self::d1(
            params.spot,
            params.strike,
            params.risk_free_rate,
            params.time_to_expiry,
            params.volatility,
        );
        let d2 = Self::d2(d1, params.volatility, params.time_to_expiry);
        let discount = (-params.risk_free_rate * params.time_to_expiry).exp();

        match params.option_type {
            OptionType::Call => {
                params.spot * Self::norm_cdf(d1) - params.strike * discount * Self::norm_cdf(d2)
            }
            OptionType::Put => {
                params.strike * discount * Self::norm_cdf(-d2) - params.spot * Self::norm_cdf(-d1)
            }
        }
    }

    fn sensitivities(&self, params: &PricingParameters) -> Sensitivities {
        if params.time_to_expiry <= 0.0 || params.volatility <= 0.0 {
            return Sensitivities {
                delta: Self::degenerate_delta(params),
                ..Sensitivities::default()
            };
        }

        let vol = params.volatility;
        let time = params.time_to_expiry;
        let sqrt_time = time.sqrt();
        let d1 = Self::d1(params.spot, params.strike, params.risk_free_rate, time, vol);
        let d2 = Self::d2(d1, vol, time);
        let discount = (-params.risk_free_rate * time).exp();
        let pdf_d1 = Self::norm_pdf(d1);

        let delta = match params.option_type {
            OptionType::Call => Self::norm_cdf(d1),
            OptionType::Put => Self::norm_cdf(d1) - 1.0,
        };

        let gamma = pdf_d1 / (params.spot * vol * sqrt_time);

        // per vol point
        let vega = params.spot * pdf_d1 * sqrt_time / 100.0;

        let decay = -params.spot * pdf_d1 * vol / (2.0 * sqrt_time);
        let carry = params.risk_free_rate * params.strike * discount;
        let theta = match params.option_type {
            OptionType::Call => decay - carry * Self::norm_cdf(d2),
            OptionType::Put => decay + carry * Self::norm_cdf(-d2),
        };

        Sensitivities {
            delta,
            gamma,
            vega,
            theta,
        }
    }
}

/// Prices a batch of contracts, preserving input order.
pub fn price_batch<O: PricingOracle + ?Sized>(
    oracle: &O,
    contracts: &[PricingParameters],
) -> Vec<f64> {
    let mut prices = Vec::with_capacity(contracts.len());
    prices.extend(contracts.iter().map(|params| oracle.price(params)));
    prices
}
