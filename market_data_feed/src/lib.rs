//! Market data contract for the screener workspace.
//!
//! This crate owns the vendor-agnostic price history models
//! ([`models::price_series::PriceSeries`] and friends), the reference-data
//! record, and the [`providers::MarketDataProvider`] trait that concrete
//! vendor adapters implement. The only adapter shipped here talks to the
//! Yahoo Finance chart/quote-summary endpoints.

pub mod models;
pub mod providers;
