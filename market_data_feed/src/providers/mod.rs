//! Provider abstraction for market data sources.
//!
//! This module defines the [`MarketDataProvider`] trait, the unified
//! interface for fetching daily price history and fundamental reference
//! fields from any market data vendor. Each concrete vendor adapter (the
//! Yahoo chart adapter lives in [`yahoo`]) implements this trait and keeps
//! vendor-specific wire formats and field-name quirks out of the engine.
//!
//! The trait is async and object-safe, so callers can hold a
//! `dyn MarketDataProvider` and select the vendor at runtime.

pub mod yahoo;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::{period::Period, price_series::PriceSeries, reference::ReferenceData};

/// Trait for fetching price history and reference data from a vendor.
///
/// A vendor that has no data for a symbol/period should return an empty
/// [`PriceSeries`], not an error; errors are reserved for transport and
/// decode failures. The consuming engine treats both the same way (no data
/// for this symbol), so neither ever propagates past it.
#[async_trait]
pub trait MarketDataProvider {
    /// Fetches daily OHLCV history for one symbol over `period`.
    async fn fetch_history(
        &self,
        symbol: &str,
        period: Period,
    ) -> Result<PriceSeries, ProviderError>;

    /// Fetches fundamental reference fields for one symbol.
    ///
    /// Fields the vendor does not report come back as `None` in the
    /// [`ReferenceData`] record.
    async fn fetch_reference_data(&self, symbol: &str) -> Result<ReferenceData, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `MarketDataProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The vendor's API returned a specific error payload.
    #[snafu(display("API error for {symbol}: {message}"))]
    Api {
        symbol: String,
        message: String,
        backtrace: Backtrace,
    },

    /// The vendor's response did not match the expected shape.
    #[snafu(display("Malformed response for {symbol}: {message}"))]
    Decode {
        symbol: String,
        message: String,
        backtrace: Backtrace,
    },
}
