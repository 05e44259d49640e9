//! Convenient re-exports of the public API.

pub use crate::utils::{DAYS_PER_YEAR, days_between, today, year_fraction};
pub use crate::volatility::implied_volatility::{
    BlackScholes, IVError, IVParams, IVResult, OptionType, PricingOracle, PricingParameters,
    Sensitivities, SolverConfig, price_batch, solve_iv, solve_iv_with,
};
pub use crate::volatility::{
    ChainRow, ExpiryChain, ExpirySelection, ExpirySelectorConfig, ExpiryStage, FilterConfig,
    FilteredQuote, MarketData, OptionChain, Quote, SmileConfig, SmileCurve, SmilePoint,
    StaticMarketData, SurfaceConfig, VolError, VolSurfaceGrid, build_smile, build_smile_with,
    build_surface, build_surface_with, fetch_chains, filter_quotes, implied_vols, interpolate,
    listed_expiries, parse_expiries, parse_expiry, select_expiries, select_nearest_expiry,
};
