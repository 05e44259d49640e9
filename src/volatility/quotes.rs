//! Option quotes and the liquidity / moneyness filter.

use super::implied_volatility::OptionType;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Raw market quote for one strike of an option chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Strike price.
    pub strike: f64,
    /// Best bid.
    pub bid: f64,
    /// Best ask.
    pub ask: f64,
    /// Call or Put.
    pub option_type: OptionType,
}

impl Quote {
    /// Creates a new quote.
    #[must_use]
    pub fn new(strike: f64, bid: f64, ask: f64, option_type: OptionType) -> Self {
        Self {
            strike,
            bid,
            ask,
            option_type,
        }
    }

    /// Creates a call quote.
    #[must_use]
    pub fn call(strike: f64, bid: f64, ask: f64) -> Self {
        Self::new(strike, bid, ask, OptionType::Call)
    }

    /// Creates a put quote.
    #[must_use]
    pub fn put(strike: f64, bid: f64, ask: f64) -> Self {
        Self::new(strike, bid, ask, OptionType::Put)
    }

    /// Mid price: `(bid + ask) / 2`.
    #[must_use]
    pub fn mid(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }

    /// Spread as a fraction of the ask: `(ask - bid) / ask`.
    #[must_use]
    pub fn spread_ratio(&self) -> f64 {
        (self.ask - self.bid) / self.ask
    }
}

/// A quote that passed [`filter_quotes`], with its mid price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilteredQuote {
    quote: Quote,
    mid: f64,
}

impl FilteredQuote {
    /// The underlying raw quote.
    #[must_use]
    pub fn quote(&self) -> &Quote {
        &self.quote
    }

    /// Strike price.
    #[must_use]
    pub fn strike(&self) -> f64 {
        self.quote.strike
    }

    /// Mid price used as the market price for inversion.
    #[must_use]
    pub fn mid(&self) -> f64 {
        self.mid
    }

    /// Call or Put.
    #[must_use]
    pub fn option_type(&self) -> OptionType {
        self.quote.option_type
    }
}

/// Liquidity and moneyness thresholds for [`filter_quotes`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Maximum `(ask - bid) / ask` (default: 0.50).
    pub spread_ratio_max: f64,
    /// Half-width of the strike window as a fraction of spot (default: 0.20).
    pub strike_band: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            spread_ratio_max: 0.50,
            strike_band: 0.20,
        }
    }
}

impl FilterConfig {
    /// Creates a filter configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum spread ratio.
    #[must_use]
    pub fn with_spread_ratio_max(mut self, spread_ratio_max: f64) -> Self {
        self.spread_ratio_max = spread_ratio_max;
        self
    }

    /// Sets the strike band.
    #[must_use]
    pub fn with_strike_band(mut self, strike_band: f64) -> Self {
        self.strike_band = strike_band;
        self
    }

    /// Inclusive strike window `[spot·(1 - band), spot·(1 + band)]`.
    #[must_use]
    pub fn strike_window(&self, spot: f64) -> (f64, f64) {
        (
            spot * (1.0 - self.strike_band),
            spot * (1.0 + self.strike_band),
        )
    }

    /// Returns true if the quote is active, liquid and inside the strike window.
    #[must_use]
    pub fn accepts(&self, quote: &Quote, spot: f64) -> bool {
        if !(quote.bid > 0.0 && quote.ask > 0.0) {
            return false;
        }
        if quote.spread_ratio() > self.spread_ratio_max {
            return false;
        }
        let (low, high) = self.strike_window(spot);
        low <= quote.strike && quote.strike <= high
    }
}

/// Keeps the quotes that are active, liquid and near the money.
///
/// Input order is preserved and duplicate strikes are kept as-is.
pub fn filter_quotes<'a, I>(quotes: I, spot: f64, config: &FilterConfig) -> Vec<FilteredQuote>
where
    I: IntoIterator<Item = &'a Quote>,
{
    quotes
        .into_iter()
        .filter(|quote| {
            let keep = config.accepts(quote, spot);
            if !keep {
                trace!(
                    "quote excluded: {:?} K={} bid={} ask={}",
                    quote.option_type, quote.strike, quote.bid, quote.ask
                );
            }
            keep
        })
        .map(|quote| FilteredQuote {
            quote: *quote,
            mid: quote.mid(),
        })
        .collect()
}
