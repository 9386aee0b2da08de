//! Technical-indicator and signal-scoring engine for the stock screener.
//!
//! The engine is a set of pure transforms over daily price history fetched
//! through a [`market_data_feed::providers::MarketDataProvider`]:
//!
//! - [`indicators`] — stateless indicator math (RSI, MACD, Bollinger,
//!   stochastic, moving averages, support/resistance, momentum, volatility).
//! - [`metrics`] — assembles one immutable [`metrics::MetricsRecord`] per
//!   symbol from indicator output plus reference fundamentals.
//! - [`signals`] — maps a metrics record onto discrete buy/sell/hold signals
//!   and an aggregate signal strength.
//! - [`risk`] — maps a metrics record onto a risk score and level.
//! - [`opportunities`] — filters and ranks a symbol universe for buy
//!   candidates that dropped from their recent high.
//!
//! Data gaps never surface as errors: an empty series or a missing
//! fundamental degrades to a documented neutral default or an explicit
//! unavailable marker inside the indicator layer, so the scoring layers
//! always receive well-formed input. The only rejected calls are
//! configuration mistakes ([`error::EngineError::InvalidConfig`]).

pub mod config;
pub mod error;
pub mod indicators;
pub mod metrics;
pub mod opportunities;
pub mod risk;
pub mod signals;
