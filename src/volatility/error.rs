//! Errors raised by the smile and surface pipelines.
//!
//! Per-quote solver failures never show up here; they are absorbed by the
//! aggregators. What remains are structural problems that make the
//! requested view impossible to build.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Point in the surface pipeline where the expiry count was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpiryStage {
    /// Expiries matched to a target day offset by the selector.
    Resolved,
    /// Selected expiries that kept at least one usable strike after filtering.
    WithData,
}

impl fmt::Display for ExpiryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiryStage::Resolved => write!(f, "near the target dates"),
            ExpiryStage::WithData => write!(f, "with liquid data"),
        }
    }
}

/// Errors for smile and surface construction.
#[derive(Debug, Clone, PartialEq)]
pub enum VolError {
    /// No quote survived filtering and inversion for a smile.
    NoUsableQuotes,

    /// Too few expiries to form a surface.
    InsufficientExpiries {
        /// Which count fell short.
        stage: ExpiryStage,
        /// Expiries found.
        found: usize,
        /// Minimum required.
        required: usize,
    },

    /// Too few strikes shared by every selected expiry.
    InsufficientCommonStrikes {
        /// Common strikes found.
        found: usize,
        /// Minimum required.
        required: usize,
    },

    /// Spot, time or rate are unusable.
    InvalidInput {
        /// Description of the invalid input.
        message: String,
    },

    /// An expiry string could not be parsed as `YYYY-MM-DD`.
    InvalidExpiry {
        /// The offending value.
        value: String,
    },

    /// The market data source failed or returned malformed data.
    MarketData {
        /// Description of the failure.
        message: String,
    },
}

impl fmt::Display for VolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolError::NoUsableQuotes => {
                write!(
                    f,
                    "no usable implied volatility after filtering; check the ticker and market hours"
                )
            }
            VolError::InsufficientExpiries {
                stage,
                found,
                required,
            } => {
                write!(
                    f,
                    "only {found} expiries {stage} (need at least {required})"
                )
            }
            VolError::InsufficientCommonStrikes { found, required } => {
                write!(
                    f,
                    "only {found} common strikes across all expiries (need at least {required})"
                )
            }
            VolError::InvalidInput { message } => {
                write!(f, "invalid input: {message}")
            }
            VolError::InvalidExpiry { value } => {
                write!(f, "invalid expiry date '{value}', expected YYYY-MM-DD")
            }
            VolError::MarketData { message } => {
                write!(f, "market data error: {message}")
            }
        }
    }
}

impl std::error::Error for VolError {}

impl From<serde_json::Error> for VolError {
    fn from(err: serde_json::Error) -> Self {
        VolError::MarketData {
            message: err.to_string(),
        }
    }
}
