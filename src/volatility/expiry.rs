//! Expiry selection against target day offsets.
//!
//! Given the expiries listed by a data source, pick at most one per target
//! horizon (e.g. 30/60/90/180 days out). The listing is not assumed to be
//! sorted, and picks never depend on its order.

use super::error::VolError;
use crate::utils::{days_between, year_fraction};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Calendar format of expiry identifiers.
pub const EXPIRY_FORMAT: &str = "%Y-%m-%d";

/// One expiry chosen for a target horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirySelection {
    /// Expiry date.
    pub expiry: NaiveDate,
    /// Calendar days from today to the expiry.
    pub days_to_expiry: i64,
    /// Target day offset this expiry was picked for.
    pub target_days: u32,
}

impl ExpirySelection {
    /// Time to expiry in years.
    #[must_use]
    pub fn time_to_expiry(&self) -> f64 {
        year_fraction(self.days_to_expiry)
    }
}

/// Target horizons and tolerance for [`select_expiries`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpirySelectorConfig {
    /// Target day offsets, processed in this order (default: 30, 60, 90, 180).
    pub target_day_offsets: Vec<u32>,
    /// Largest accepted distance in days between a pick and its target (default: 20).
    pub max_day_diff: i64,
}

impl Default for ExpirySelectorConfig {
    fn default() -> Self {
        Self {
            target_day_offsets: vec![30, 60, 90, 180],
            max_day_diff: 20,
        }
    }
}

impl ExpirySelectorConfig {
    /// Creates a selector configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target day offsets.
    #[must_use]
    pub fn with_targets(mut self, target_day_offsets: Vec<u32>) -> Self {
        self.target_day_offsets = target_day_offsets;
        self
    }

    /// Sets the maximum distance to a target.
    #[must_use]
    pub fn with_max_day_diff(mut self, max_day_diff: i64) -> Self {
        self.max_day_diff = max_day_diff;
        self
    }
}

/// Parses a `YYYY-MM-DD` expiry identifier.
pub fn parse_expiry(value: &str) -> Result<NaiveDate, VolError> {
    NaiveDate::parse_from_str(value.trim(), EXPIRY_FORMAT).map_err(|_| VolError::InvalidExpiry {
        value: value.to_string(),
    })
}

/// Parses a list of expiry identifiers, failing on the first bad one.
pub fn parse_expiries<S: AsRef<str>>(values: &[S]) -> Result<Vec<NaiveDate>, VolError> {
    values.iter().map(|v| parse_expiry(v.as_ref())).collect()
}

/// Closest future expiry to `target`, with the distance in days.
///
/// Equidistant candidates resolve to the earlier date.
fn nearest(available: &[NaiveDate], today: NaiveDate, target: NaiveDate) -> Option<(NaiveDate, i64)> {
    available
        .iter()
        .copied()
        .filter(|expiry| *expiry > today)
        .map(|expiry| (expiry, days_between(target, expiry).abs()))
        .min_by_key(|&(expiry, distance)| (distance, expiry))
}

/// Picks the expiry nearest to `target_days` from today, with no tolerance.
///
/// Used for single-expiry views such as a smile. Returns `None` when no
/// expiry lies in the future.
pub fn select_nearest_expiry(
    available: &[NaiveDate],
    today: NaiveDate,
    target_days: u32,
) -> Option<ExpirySelection> {
    let target = today.checked_add_days(Days::new(u64::from(target_days)))?;
    let (expiry, _) = nearest(available, today, target)?;
    Some(ExpirySelection {
        expiry,
        days_to_expiry: days_between(today, expiry),
        target_days,
    })
}

/// Picks at most one expiry per target offset, in target order.
///
/// For each target the nearest future expiry is taken if it lies within
/// `max_day_diff` days. An expiry already picked for an earlier target is
/// not reused; the later target then goes without.
pub fn select_expiries(
    available: &[NaiveDate],
    today: NaiveDate,
    config: &ExpirySelectorConfig,
) -> Vec<ExpirySelection> {
    let mut used = HashSet::new();
    let mut selected = Vec::with_capacity(config.target_day_offsets.len());

    for &target_days in &config.target_day_offsets {
        let Some(target) = today.checked_add_days(Days::new(u64::from(target_days))) else {
            continue;
        };
        let Some((expiry, distance)) = nearest(available, today, target) else {
            trace!("target {}d: no future expiry available", target_days);
            continue;
        };
        if distance > config.max_day_diff {
            trace!(
                "target {}d: nearest expiry {} is {}d away (max {})",
                target_days, expiry, distance, config.max_day_diff
            );
            continue;
        }
        if !used.insert(expiry) {
            trace!("target {}d: expiry {} already selected", target_days, expiry);
            continue;
        }
        selected.push(ExpirySelection {
            expiry,
            days_to_expiry: days_between(today, expiry),
            target_days,
        });
    }

    debug!(
        "selected {} of {} target expiries from {} listed",
        selected.len(),
        config.target_day_offsets.len(),
        available.len()
    );
    selected
}
