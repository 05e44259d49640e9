//! Types for implied volatility calculation.

use serde::{Deserialize, Serialize};

/// Option type for pricing and IV calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Call option (right to buy the underlying at strike price).
    Call,
    /// Put option (right to sell the underlying at strike price).
    Put,
}

/// Contract terms for IV calculation.
///
/// Everything the pricing oracle needs except the volatility, which is
/// the unknown the solver searches for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IVParams {
    /// Underlying spot price in price units.
    pub spot: f64,
    /// Option strike price in price units.
    pub strike: f64,
    /// Time to expiration in years (e.g., 30 days = 30.0 / 365.0).
    pub time_to_expiry: f64,
    /// Risk-free interest rate (annualized, continuously compounded).
    pub risk_free_rate: f64,
    /// Option type (Call or Put).
    pub option_type: OptionType,
}

impl IVParams {
    /// Creates new IV parameters.
    ///
    /// # Arguments
    /// - `spot`: Underlying spot price in price units
    /// - `strike`: Option strike price in price units
    /// - `time_to_expiry`: Time to expiration in years
    /// - `risk_free_rate`: Risk-free interest rate (annualized)
    /// - `option_type`: Call or Put
    #[must_use]
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            option_type,
        }
    }

    /// Creates parameters for a call option.
    #[must_use]
    pub fn call(spot: f64, strike: f64, time_to_expiry: f64, risk_free_rate: f64) -> Self {
        Self::new(
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            OptionType::Call,
        )
    }

    /// Creates parameters for a put option.
    #[must_use]
    pub fn put(spot: f64, strike: f64, time_to_expiry: f64, risk_free_rate: f64) -> Self {
        Self::new(
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            OptionType::Put,
        )
    }

    /// Binds a volatility to these terms, producing oracle input.
    #[must_use]
    pub fn with_volatility(&self, volatility: f64) -> PricingParameters {
        PricingParameters {
            spot: self.spot,
            strike: self.strike,
            risk_free_rate: self.risk_free_rate,
            volatility,
            time_to_expiry: self.time_to_expiry,
            option_type: self.option_type,
        }
    }

    /// Returns true when spot, strike, time and rate are all finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.spot.is_finite()
            && self.strike.is_finite()
            && self.time_to_expiry.is_finite()
            && self.risk_free_rate.is_finite()
    }

    /// Calculates the intrinsic value of the option.
    ///
    /// For calls: max(0, spot - strike)
    /// For puts: max(0, strike - spot)
    #[must_use]
    pub fn intrinsic_value(&self) -> f64 {
        match self.option_type {
            OptionType::Call => (self.spot - self.strike).max(0.0),
            OptionType::Put => (self.strike - self.spot).max(0.0),
        }
    }
}

/// Full input to the pricing oracle: contract terms plus a volatility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingParameters {
    /// Underlying spot price (S).
    pub spot: f64,
    /// Strike price (K).
    pub strike: f64,
    /// Risk-free rate (r).
    pub risk_free_rate: f64,
    /// Volatility as a decimal (σ, 0.20 = 20%).
    pub volatility: f64,
    /// Time to expiry in years (T).
    pub time_to_expiry: f64,
    /// Call or Put.
    pub option_type: OptionType,
}

impl PricingParameters {
    /// Strips the volatility, returning the contract terms.
    #[must_use]
    pub fn contract(&self) -> IVParams {
        IVParams::new(
            self.spot,
            self.strike,
            self.time_to_expiry,
            self.risk_free_rate,
            self.option_type,
        )
    }
}

/// Price sensitivities reported by a pricing oracle.
///
/// `vega` is per 1 volatility point (textbook vega / 100) and `theta` is
/// annualized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sensitivities {
    /// ∂price/∂S.
    pub delta: f64,
    /// ∂²price/∂S².
    pub gamma: f64,
    /// ∂price/∂σ per 1 vol point.
    pub vega: f64,
    /// ∂price/∂t per year.
    pub theta: f64,
}

impl Sensitivities {
    /// Vega rescaled to decimal-volatility units (dPrice/dσ).
    #[must_use]
    pub fn dprice_dsigma(&self) -> f64 {
        self.vega * 100.0
    }

    /// Theta per calendar day.
    #[must_use]
    pub fn theta_per_day(&self) -> f64 {
        self.theta / 365.0
    }
}

/// Successful IV inversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IVResult {
    /// Implied volatility as a decimal (e.g., 0.25 = 25%).
    pub iv: f64,
    /// Newton steps taken before the price matched (0 if the initial guess already did).
    pub iterations: u32,
    /// Final |model price - market price|.
    pub residual: f64,
}

impl IVResult {
    /// Creates a new IV result.
    #[must_use]
    pub fn new(iv: f64, iterations: u32, residual: f64) -> Self {
        Self {
            iv,
            iterations,
            residual,
        }
    }

    /// Returns the IV as a percentage (e.g., 25.0 for 25%).
    #[must_use]
    pub fn iv_percent(&self) -> f64 {
        self.iv * 100.0
    }
}
