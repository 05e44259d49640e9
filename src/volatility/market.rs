//! Market data seam.
//!
//! The pipelines never fetch anything themselves: chains are gathered up
//! front through [`MarketData`] and handed over as plain values.

use super::error::VolError;
use super::expiry::parse_expiry;
use super::implied_volatility::OptionType;
use super::quotes::Quote;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One row of an option chain as delivered by a data source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainRow {
    /// Strike price.
    pub strike: f64,
    /// Best bid.
    pub bid: f64,
    /// Best ask.
    pub ask: f64,
}

impl ChainRow {
    /// Tags the row with its option class.
    #[must_use]
    pub fn into_quote(self, option_type: OptionType) -> Quote {
        Quote::new(self.strike, self.bid, self.ask, option_type)
    }
}

/// Calls and puts for a single expiry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionChain {
    /// Call rows.
    #[serde(default)]
    pub calls: Vec<ChainRow>,
    /// Put rows.
    #[serde(default)]
    pub puts: Vec<ChainRow>,
}

impl OptionChain {
    /// Call rows as quotes.
    #[must_use]
    pub fn call_quotes(&self) -> Vec<Quote> {
        self.calls
            .iter()
            .map(|row| row.into_quote(OptionType::Call))
            .collect()
    }

    /// Put rows as quotes.
    #[must_use]
    pub fn put_quotes(&self) -> Vec<Quote> {
        self.puts
            .iter()
            .map(|row| row.into_quote(OptionType::Put))
            .collect()
    }

    /// True when the chain has no rows at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.puts.is_empty()
    }
}

/// An option chain together with its expiry date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiryChain {
    /// Expiry date.
    pub expiry: NaiveDate,
    /// Rows for that expiry.
    #[serde(flatten)]
    pub chain: OptionChain,
}

/// Source of spot, listed expiries and option chains.
pub trait MarketData {
    /// Current underlying price.
    fn spot(&self) -> Result<f64, VolError>;

    /// Listed expiry identifiers (`YYYY-MM-DD`), in any order.
    fn expiries(&self) -> Result<Vec<String>, VolError>;

    /// Chain rows for one expiry.
    fn option_chain(&self, expiry: NaiveDate) -> Result<OptionChain, VolError>;
}

/// Reads every requested chain from `source`.
pub fn fetch_chains<M: MarketData + ?Sized>(
    source: &M,
    expiries: &[NaiveDate],
) -> Result<Vec<ExpiryChain>, VolError> {
    expiries
        .iter()
        .map(|&expiry| {
            let chain = source.option_chain(expiry)?;
            debug!(
                "fetched chain {}: {} calls, {} puts",
                expiry,
                chain.calls.len(),
                chain.puts.len()
            );
            Ok(ExpiryChain { expiry, chain })
        })
        .collect()
}

/// Listed expiries of `source`, parsed.
pub fn listed_expiries<M: MarketData + ?Sized>(source: &M) -> Result<Vec<NaiveDate>, VolError> {
    source
        .expiries()?
        .iter()
        .map(|value| parse_expiry(value))
        .collect()
}

/// In-memory market data, e.g. loaded from a JSON snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticMarketData {
    /// Underlying price.
    pub spot: f64,
    /// Chains keyed by expiry.
    pub chains: Vec<ExpiryChain>,
}

impl StaticMarketData {
    /// Creates a source from already-built chains.
    #[must_use]
    pub fn new(spot: f64, chains: Vec<ExpiryChain>) -> Self {
        Self { spot, chains }
    }

    /// Parses a JSON document of the shape
    /// `{"spot": 100.0, "chains": [{"expiry": "2025-03-21", "calls": [...], "puts": [...]}]}`.
    pub fn from_json(json: &str) -> Result<Self, VolError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl MarketData for StaticMarketData {
    fn spot(&self) -> Result<f64, VolError> {
        Ok(self.spot)
    }

    fn expiries(&self) -> Result<Vec<String>, VolError> {
        Ok(self
            .chains
            .iter()
            .map(|c| c.expiry.format(super::expiry::EXPIRY_FORMAT).to_string())
            .collect())
    }

    fn option_chain(&self, expiry: NaiveDate) -> Result<OptionChain, VolError> {
        self.chains
            .iter()
            .find(|c| c.expiry == expiry)
            .map(|c| c.chain.clone())
            .ok_or_else(|| VolError::MarketData {
                message: format!("no option chain listed for {expiry}"),
            })
    }
}
