//! Calendar helpers shared by the expiry selector and the aggregators.

use chrono::{Local, NaiveDate};

/// Day count used to turn calendar days into a year fraction.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Signed number of calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Converts calendar days to years on an ACT/365 basis.
pub fn year_fraction(days: i64) -> f64 {
    days as f64 / DAYS_PER_YEAR
}
