//! Screener configuration: parsing, normalization, and loading.
//!
//! This module defines the TOML-backed [`ScreenerConfig`] consumed by the
//! engine entry points. The engine never reads configuration from global
//! state; callers construct or load a config and hand it in.
//!
//! Key behaviors:
//! - Normalization trims and uppercases universe symbols, trims sector
//!   labels, and de-duplicates the universe by symbol while preserving
//!   order.
//! - `validate` fails fast with [`EngineError::InvalidConfig`] on anything
//!   the engine cannot run with (zero RSI window, negative thresholds);
//!   validation errors are programming mistakes, not data conditions.
//!
//! Entrypoints:
//! - Parse + normalize + validate from a TOML string: [`load_config_str`]
//! - From a file path: [`load_config_path`]
//! - From the path in the `SCREENER_CONFIG` env var: [`load_config_from_env`]

use std::{num::NonZeroUsize, path::Path};

use anyhow::Context;
use indexmap::IndexMap;
use market_data_feed::models::period::Period;
use serde::{Deserialize, Serialize};
use shared_utils::env::get_env_var;

use crate::{
    error::EngineError,
    opportunities::{ScanConfig, UniverseEntry},
};

/// Env var pointing at the screener config file.
pub const CONFIG_PATH_VAR: &str = "SCREENER_CONFIG";

/// Caller-supplied configuration for one engine instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ScreenerConfig {
    /// Lookback for price/indicator context (e.g. `"1y"`).
    pub analysis_period: Period,
    /// Lookback for the drop-from-high reference window (e.g. `"6mo"`).
    ///
    /// Deliberately independent of `analysis_period`; the drop is measured
    /// against a recent high, not the full analysis window.
    pub drop_window: Period,
    /// RSI lookback window in sessions.
    pub rsi_window: usize,
    /// Dollar amount the host sizes each buy with. Carried for the host's
    /// order form only; the engine never places orders.
    pub investment_amount: f64,
    /// Thresholds for the opportunity scan.
    pub scan: ScanConfig,
    /// The symbol universe scanned for opportunities, with sector labels.
    pub universe: Vec<UniverseEntry>,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            analysis_period: Period::OneYear,
            drop_window: Period::SixMonths,
            rsi_window: 14,
            investment_amount: 1_000.0,
            scan: ScanConfig::default(),
            universe: default_universe(),
        }
    }
}

fn default_universe() -> Vec<UniverseEntry> {
    [
        ("AAPL", "Technology"),
        ("GOOGL", "Communication Services"),
        ("MSFT", "Technology"),
        ("TSLA", "Consumer Cyclical"),
        ("AMZN", "Consumer Cyclical"),
        ("NVDA", "Technology"),
        ("META", "Communication Services"),
        ("NFLX", "Communication Services"),
    ]
    .into_iter()
    .map(|(symbol, sector)| UniverseEntry {
        symbol: symbol.to_string(),
        sector: sector.to_string(),
    })
    .collect()
}

impl ScreenerConfig {
    /// Trims and uppercases symbols, trims sectors, drops empty symbols,
    /// and de-duplicates the universe by symbol preserving first occurrence.
    pub fn normalize(&mut self) {
        let mut dedup: IndexMap<String, UniverseEntry> = IndexMap::new();
        for entry in self.universe.drain(..) {
            let symbol = entry.symbol.trim().to_uppercase();
            if symbol.is_empty() {
                continue;
            }
            dedup.entry(symbol.clone()).or_insert(UniverseEntry {
                symbol,
                sector: entry.sector.trim().to_string(),
            });
        }
        self.universe = dedup.into_values().collect();
    }

    /// Rejects configuration the engine cannot run with.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.rsi_window == 0 {
            return Err(EngineError::invalid("rsi_window must be at least 1"));
        }
        if !(self.investment_amount >= 0.0) {
            return Err(EngineError::invalid("investment_amount must be >= 0"));
        }
        if !(self.scan.min_drop_pct >= 0.0) {
            return Err(EngineError::invalid("scan.min_drop_pct must be >= 0"));
        }
        if !(self.scan.max_pe > 0.0) {
            return Err(EngineError::invalid("scan.max_pe must be positive"));
        }
        if !(self.scan.min_market_cap >= 0.0) {
            return Err(EngineError::invalid("scan.min_market_cap must be >= 0"));
        }
        Ok(())
    }

    /// The RSI window as a typed non-zero count. Call after [`validate`].
    ///
    /// [`validate`]: ScreenerConfig::validate
    pub(crate) fn rsi_window_typed(&self) -> Result<NonZeroUsize, EngineError> {
        NonZeroUsize::new(self.rsi_window)
            .ok_or_else(|| EngineError::invalid("rsi_window must be at least 1"))
    }
}

/// Parses, normalizes, and validates a config from a TOML string.
pub fn load_config_str(raw: &str) -> anyhow::Result<ScreenerConfig> {
    let mut config: ScreenerConfig =
        toml::from_str(raw).context("failed to parse screener config TOML")?;
    config.normalize();
    config.validate()?;
    Ok(config)
}

/// Parses, normalizes, and validates a config from a file path.
pub fn load_config_path(path: impl AsRef<Path>) -> anyhow::Result<ScreenerConfig> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    load_config_str(&raw)
}

/// Loads the config from the path named by `SCREENER_CONFIG`.
pub fn load_config_from_env() -> anyhow::Result<ScreenerConfig> {
    let path = get_env_var(CONFIG_PATH_VAR)
        .with_context(|| format!("{CONFIG_PATH_VAR} must point at a screener config file"))?;
    load_config_path(path)
}
