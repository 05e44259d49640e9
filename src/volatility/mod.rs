//! Market-implied volatility from European option chains.
//!
//! Data flows leaf-first through the submodules:
//!
//! raw chain rows → [`quotes`] filter → [`implied_volatility`] solver →
//! per-strike volatilities → [`smile`] (one expiry) or [`surface`] (several
//! expiries chosen by [`expiry`]).
//!
//! Everything here is synchronous and free of shared state. Market data is
//! gathered beforehand through the [`market`] seam.

pub mod error;
pub mod expiry;
pub mod implied_volatility;
pub mod market;
pub mod quotes;
pub mod smile;
pub mod surface;

pub use error::{ExpiryStage, VolError};
pub use expiry::{
    ExpirySelection, ExpirySelectorConfig, parse_expiries, parse_expiry, select_expiries,
    select_nearest_expiry,
};
pub use market::{
    ChainRow, ExpiryChain, MarketData, OptionChain, StaticMarketData, fetch_chains,
    listed_expiries,
};
pub use quotes::{FilterConfig, FilteredQuote, Quote, filter_quotes};
pub use smile::{
    SmileConfig, SmileCurve, SmilePoint, build_smile, build_smile_with, implied_vols, interpolate,
};
pub use surface::{SurfaceConfig, VolSurfaceGrid, build_surface, build_surface_with};
