//! Configuration loading from TOML.
//!
//! Reads `config.toml` (or the file named by `BIDWISE_CONFIG`) and
//! deserializes it into strongly-typed structs. Every section has
//! defaults, so a partial file only overrides what it mentions.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;

use crate::billing::{BillingPolicy, DEFAULT_FINE_PERCENTAGE};
use crate::engine::{BidRecommender, ConflictSearch};

/// Default config file path.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Env var overriding the config path.
pub const CONFIG_PATH_ENV: &str = "BIDWISE_CONFIG";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub engine: EngineConfig,
    pub billing: BillingConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    /// Currency code shown next to amounts by callers.
    pub currency: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "BIDWISE".to_string(),
            currency: "INR".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub conflict_search: ConflictSearch,
}

impl EngineConfig {
    pub fn recommender(&self) -> BidRecommender {
        BidRecommender::new(self.conflict_search)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BillingConfig {
    /// Late-return fine (percent of the daily bid) for cars without one.
    pub default_fine_percentage: Decimal,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            default_fine_percentage: DEFAULT_FINE_PERCENTAGE,
        }
    }
}

impl BillingConfig {
    pub fn policy(&self) -> BillingPolicy {
        BillingPolicy::new(self.default_fine_percentage)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 8080,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Path to load from: `BIDWISE_CONFIG` if set, else `config.toml`.
    pub fn default_path() -> String {
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string())
    }
}
