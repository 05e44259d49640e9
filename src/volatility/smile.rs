//! Volatility smile for a single expiry.
//!
//! Calls and puts are filtered and inverted independently, then merged into
//! one strike-sorted curve. Both classes are kept when they share a strike,
//! so the curve may hold two points at the same strike.

use super::error::VolError;
use super::implied_volatility::{
    BlackScholes, IVParams, OptionType, PricingOracle, SolverConfig, solve_iv_with,
};
use super::quotes::{FilterConfig, Quote, filter_quotes};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Implied volatility observed at one strike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmilePoint {
    /// Strike price.
    pub strike: f64,
    /// Implied volatility as a decimal.
    pub iv: f64,
    /// Option class the volatility was implied from.
    pub option_type: OptionType,
}

/// Filter and solver settings shared by the smile and surface pipelines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmileConfig {
    /// Quote filter thresholds.
    pub filter: FilterConfig,
    /// Newton-Raphson settings.
    pub solver: SolverConfig,
}

/// Merged call/put volatility curve for one expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmileCurve {
    points: Vec<SmilePoint>,
    calls: Vec<SmilePoint>,
    puts: Vec<SmilePoint>,
    atm_iv: f64,
    spot: f64,
    time_to_expiry: f64,
}

impl SmileCurve {
    /// Merged points, ascending by strike; at equal strikes the put comes first.
    #[must_use]
    pub fn points(&self) -> &[SmilePoint] {
        &self.points
    }

    /// Call-implied points, in chain order.
    #[must_use]
    pub fn calls(&self) -> &[SmilePoint] {
        &self.calls
    }

    /// Put-implied points, in chain order.
    #[must_use]
    pub fn puts(&self) -> &[SmilePoint] {
        &self.puts
    }

    /// At-the-money volatility, interpolated at spot.
    #[must_use]
    pub fn atm_iv(&self) -> f64 {
        self.atm_iv
    }

    /// At-the-money volatility in percent.
    #[must_use]
    pub fn atm_iv_percent(&self) -> f64 {
        self.atm_iv * 100.0
    }

    /// Spot the curve was built against.
    #[must_use]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Time to expiry in years.
    #[must_use]
    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    /// Number of merged points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the curve holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Linearly interpolated volatility at `strike`, clamped at the ends.
    #[must_use]
    pub fn iv_at(&self, strike: f64) -> Option<f64> {
        let strikes: Vec<f64> = self.points.iter().map(|p| p.strike).collect();
        let ivs: Vec<f64> = self.points.iter().map(|p| p.iv).collect();
        interpolate(&strikes, &ivs, strike)
    }
}

/// One-dimensional linear interpolation over ascending `xs`.
///
/// Outside `[xs[0], xs[last]]` the boundary value is returned. Repeated x
/// values are allowed; at an exact repeated x the last of them wins.
/// Returns `None` for empty or mismatched inputs.
#[must_use]
pub fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> Option<f64> {
    if xs.is_empty() || xs.len() != ys.len() {
        return None;
    }
    let last = xs.len() - 1;
    if x <= xs[0] {
        return Some(ys[0]);
    }
    if x >= xs[last] {
        return Some(ys[last]);
    }

    // xs[j - 1] <= x < xs[j]
    let j = xs.partition_point(|&xi| xi <= x);
    let (x0, y0) = (xs[j - 1], ys[j - 1]);
    let (x1, y1) = (xs[j], ys[j]);
    Some(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
}

pub(crate) fn validate_market(spot: f64, rate: f64) -> Result<(), VolError> {
    if !(spot.is_finite() && spot > 0.0) {
        return Err(VolError::InvalidInput {
            message: format!("spot must be positive and finite, got {spot}"),
        });
    }
    if !rate.is_finite() {
        return Err(VolError::InvalidInput {
            message: format!("rate must be finite, got {rate}"),
        });
    }
    Ok(())
}

fn validate_time(time_to_expiry: f64) -> Result<(), VolError> {
    if !(time_to_expiry.is_finite() && time_to_expiry > 0.0) {
        return Err(VolError::InvalidInput {
            message: format!("time to expiry must be positive and finite, got {time_to_expiry}"),
        });
    }
    Ok(())
}

/// Filters `quotes` and inverts each survivor, dropping solver failures.
///
/// Output keeps the order of the input chain.
pub fn implied_vols<O: PricingOracle + ?Sized>(
    oracle: &O,
    quotes: &[Quote],
    spot: f64,
    time_to_expiry: f64,
    rate: f64,
    config: &SmileConfig,
) -> Vec<SmilePoint> {
    filter_quotes(quotes, spot, &config.filter)
        .into_iter()
        .filter_map(|quote| {
            let params = IVParams::new(
                spot,
                quote.strike(),
                time_to_expiry,
                rate,
                quote.option_type(),
            );
            match solve_iv_with(oracle, &params, quote.mid(), &config.solver) {
                Ok(result) => Some(SmilePoint {
                    strike: quote.strike(),
                    iv: result.iv,
                    option_type: quote.option_type(),
                }),
                Err(err) => {
                    trace!(
                        "dropping {:?} K={} mid={:.4}: {}",
                        quote.option_type(),
                        quote.strike(),
                        quote.mid(),
                        err.kind()
                    );
                    None
                }
            }
        })
        .collect()
}

/// Builds a smile with the Black-Scholes oracle and default settings.
///
/// # Arguments
/// - `calls`, `puts`: raw chain rows for one expiry
/// - `spot`: underlying price
/// - `time_to_expiry`: years to expiry
/// - `rate`: risk-free rate
pub fn build_smile(
    calls: &[Quote],
    puts: &[Quote],
    spot: f64,
    time_to_expiry: f64,
    rate: f64,
) -> Result<SmileCurve, VolError> {
    build_smile_with(
        &BlackScholes,
        calls,
        puts,
        spot,
        time_to_expiry,
        rate,
        &SmileConfig::default(),
    )
}

/// Builds a smile against any pricing oracle.
///
/// # Returns
/// - `Ok(SmileCurve)` with at least one point and an interpolated ATM volatility
/// - `Err(VolError::NoUsableQuotes)` if nothing survived filtering and inversion
/// - `Err(VolError::InvalidInput)` for non-positive spot or time
pub fn build_smile_with<O: PricingOracle + ?Sized>(
    oracle: &O,
    calls: &[Quote],
    puts: &[Quote],
    spot: f64,
    time_to_expiry: f64,
    rate: f64,
    config: &SmileConfig,
) -> Result<SmileCurve, VolError> {
    validate_market(spot, rate)?;
    validate_time(time_to_expiry)?;

    let call_points = implied_vols(oracle, calls, spot, time_to_expiry, rate, config);
    let put_points = implied_vols(oracle, puts, spot, time_to_expiry, rate, config);
    debug!(
        "smile T={:.4}: {} call points from {} rows, {} put points from {} rows",
        time_to_expiry,
        call_points.len(),
        calls.len(),
        put_points.len(),
        puts.len()
    );

    // stable sort keeps puts ahead of calls at a shared strike
    let mut points: Vec<SmilePoint> = put_points.iter().chain(&call_points).copied().collect();
    points.sort_by(|a, b| a.strike.total_cmp(&b.strike));

    let strikes: Vec<f64> = points.iter().map(|p| p.strike).collect();
    let ivs: Vec<f64> = points.iter().map(|p| p.iv).collect();
    let atm_iv = interpolate(&strikes, &ivs, spot).ok_or(VolError::NoUsableQuotes)?;

    info!(
        "smile built: {} points, ATM IV {:.2}% at spot {:.2}",
        points.len(),
        atm_iv * 100.0,
        spot
    );

    Ok(SmileCurve {
        points,
        calls: call_points,
        puts: put_points,
        atm_iv,
        spot,
        time_to_expiry,
    })
}
