//! Implied volatility surface across expiries and strikes.
//!
//! Expiries are picked by the [`expiry`](super::expiry) selector, each one is
//! reduced to a single volatility per strike, and only the strikes present
//! in every expiry become grid columns. The resulting grid is always
//! rectangular with no missing cells.

use super::error::{ExpiryStage, VolError};
use super::expiry::{ExpirySelection, ExpirySelectorConfig, select_expiries};
use super::implied_volatility::{BlackScholes, PricingOracle, SolverConfig};
use super::market::ExpiryChain;
use super::quotes::FilterConfig;
use super::smile::{SmileConfig, SmilePoint, implied_vols, interpolate, validate_market};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Settings for [`build_surface`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Quote filter thresholds.
    pub filter: FilterConfig,
    /// Newton-Raphson settings.
    pub solver: SolverConfig,
    /// Target horizons and tolerance.
    pub selector: ExpirySelectorConfig,
    /// Risk-free rate (default: 0.05).
    pub rate: f64,
    /// Minimum expiries, both resolved and with data (default: 2).
    pub min_expiries: usize,
    /// Minimum strikes shared by all expiries (default: 3).
    pub min_common_strikes: usize,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            solver: SolverConfig::default(),
            selector: ExpirySelectorConfig::default(),
            rate: 0.05,
            min_expiries: 2,
            min_common_strikes: 3,
        }
    }
}

impl SurfaceConfig {
    /// Creates a surface configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the risk-free rate.
    #[must_use]
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Sets the expiry selector configuration.
    #[must_use]
    pub fn with_selector(mut self, selector: ExpirySelectorConfig) -> Self {
        self.selector = selector;
        self
    }

    /// Sets the quote filter configuration.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the solver configuration.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Sets the minimum number of expiries and common strikes.
    #[must_use]
    pub fn with_minimums(mut self, min_expiries: usize, min_common_strikes: usize) -> Self {
        self.min_expiries = min_expiries;
        self.min_common_strikes = min_common_strikes;
        self
    }

    fn smile_config(&self) -> SmileConfig {
        SmileConfig {
            filter: self.filter.clone(),
            solver: self.solver.clone(),
        }
    }
}

/// Rectangular volatility grid, rows by expiry and columns by strike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolSurfaceGrid {
    expiries: Vec<NaiveDate>,
    days: Vec<i64>,
    strikes: Vec<f64>,
    values: Vec<Vec<f64>>,
}

impl VolSurfaceGrid {
    /// Expiry date of each row.
    #[must_use]
    pub fn expiries(&self) -> &[NaiveDate] {
        &self.expiries
    }

    /// Days to expiry of each row, ascending.
    #[must_use]
    pub fn days(&self) -> &[i64] {
        &self.days
    }

    /// Strike of each column, ascending.
    #[must_use]
    pub fn strikes(&self) -> &[f64] {
        &self.strikes
    }

    /// Volatilities in percent, `values()[row][column]`.
    #[must_use]
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// One expiry row.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        self.values.get(row).map(Vec::as_slice)
    }

    /// Volatility in percent at `(row, column)`.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.values.get(row)?.get(column).copied()
    }

    /// `(rows, columns)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.days.len(), self.strikes.len())
    }

    /// ATM volatility (percent) per row, interpolated at `spot`.
    #[must_use]
    pub fn atm_term_structure(&self, spot: f64) -> Vec<(i64, f64)> {
        self.days
            .iter()
            .zip(&self.values)
            .filter_map(|(&days, row)| Some((days, interpolate(&self.strikes, row, spot)?)))
            .collect()
    }
}

/// Strike usable as an ordered map key.
#[derive(Debug, Clone, Copy, PartialEq)]
struct StrikeKey(f64);

impl Eq for StrikeKey {}

impl PartialOrd for StrikeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StrikeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// One volatility per strike, favouring the out-of-the-money side.
///
/// Strikes at or below spot take the put volatility, strikes above take the
/// call volatility; a strike only one side quotes falls back to that side.
fn merge_otm(calls: &[SmilePoint], puts: &[SmilePoint], spot: f64) -> BTreeMap<StrikeKey, f64> {
    let mut merged = BTreeMap::new();
    for p in puts.iter().filter(|p| p.strike <= spot) {
        merged.insert(StrikeKey(p.strike), p.iv);
    }
    for c in calls.iter().filter(|c| c.strike > spot) {
        merged.insert(StrikeKey(c.strike), c.iv);
    }
    for point in calls.iter().chain(puts) {
        merged.entry(StrikeKey(point.strike)).or_insert(point.iv);
    }
    merged
}

/// Builds a surface with the Black-Scholes oracle.
///
/// # Arguments
/// - `chains`: option chains for every listed expiry
/// - `spot`: underlying price
/// - `today`: valuation date the target offsets are counted from
/// - `config`: filter, solver, selector and threshold settings
pub fn build_surface(
    chains: &[ExpiryChain],
    spot: f64,
    today: NaiveDate,
    config: &SurfaceConfig,
) -> Result<VolSurfaceGrid, VolError> {
    build_surface_with(&BlackScholes, chains, spot, today, config)
}

/// Builds a surface against any pricing oracle.
///
/// # Returns
/// - `Err(VolError::InsufficientExpiries)` when too few targets resolve to an
///   expiry, or too few selected expiries keep any usable strike
/// - `Err(VolError::InsufficientCommonStrikes)` when the strike intersection
///   is too small
pub fn build_surface_with<O: PricingOracle + ?Sized>(
    oracle: &O,
    chains: &[ExpiryChain],
    spot: f64,
    today: NaiveDate,
    config: &SurfaceConfig,
) -> Result<VolSurfaceGrid, VolError> {
    validate_market(spot, config.rate)?;

    let available: Vec<NaiveDate> = chains.iter().map(|c| c.expiry).collect();
    let selections = select_expiries(&available, today, &config.selector);
    if selections.len() < config.min_expiries {
        return Err(VolError::InsufficientExpiries {
            stage: ExpiryStage::Resolved,
            found: selections.len(),
            required: config.min_expiries,
        });
    }
    info!(
        "selected {} expiries: {}",
        selections.len(),
        selections
            .iter()
            .map(|s| format!("{} ({}d)", s.expiry, s.days_to_expiry))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let smile_config = config.smile_config();
    let mut rows: Vec<(ExpirySelection, BTreeMap<StrikeKey, f64>)> = Vec::new();
    for selection in selections {
        // selections come from `chains` and lie strictly after today
        let expiry_chain = chains.iter().find(|c| c.expiry == selection.expiry);
        debug_assert!(expiry_chain.is_some());
        let Some(expiry_chain) = expiry_chain else {
            continue;
        };
        let time_to_expiry = selection.time_to_expiry();
        debug_assert!(time_to_expiry > 0.0);

        let chain = &expiry_chain.chain;
        let calls = implied_vols(
            oracle,
            &chain.call_quotes(),
            spot,
            time_to_expiry,
            config.rate,
            &smile_config,
        );
        let puts = implied_vols(
            oracle,
            &chain.put_quotes(),
            spot,
            time_to_expiry,
            config.rate,
            &smile_config,
        );
        let merged = merge_otm(&calls, &puts, spot);

        if merged.is_empty() {
            warn!(
                "{} ({}d): no liquid data, skipped",
                selection.expiry, selection.days_to_expiry
            );
            continue;
        }
        debug!(
            "{} ({}d): {} liquid strikes",
            selection.expiry,
            selection.days_to_expiry,
            merged.len()
        );
        rows.push((selection, merged));
    }

    if rows.len() < config.min_expiries {
        return Err(VolError::InsufficientExpiries {
            stage: ExpiryStage::WithData,
            found: rows.len(),
            required: config.min_expiries,
        });
    }

    rows.sort_by_key(|(selection, _)| selection.days_to_expiry);

    // a column exists only if every row has the strike
    let columns: Vec<(f64, Vec<f64>)> = match rows.first() {
        Some((_, first)) => first
            .keys()
            .filter_map(|key| {
                let column = rows
                    .iter()
                    .map(|(_, merged)| merged.get(key).map(|iv| iv * 100.0))
                    .collect::<Option<Vec<f64>>>()?;
                Some((key.0, column))
            })
            .collect(),
        None => Vec::new(),
    };

    if columns.len() < config.min_common_strikes {
        return Err(VolError::InsufficientCommonStrikes {
            found: columns.len(),
            required: config.min_common_strikes,
        });
    }

    let strikes: Vec<f64> = columns.iter().map(|(strike, _)| *strike).collect();
    let values: Vec<Vec<f64>> = (0..rows.len())
        .map(|r| columns.iter().map(|(_, column)| column[r]).collect())
        .collect();

    info!("built {}x{} IV grid", rows.len(), strikes.len());

    Ok(VolSurfaceGrid {
        expiries: rows.iter().map(|(s, _)| s.expiry).collect(),
        days: rows.iter().map(|(s, _)| s.days_to_expiry).collect(),
        strikes,
        values,
    })
}
