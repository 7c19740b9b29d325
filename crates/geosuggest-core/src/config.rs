// crates/geosuggest-core/src/config.rs

//! # Configuration
//!
//! Layered with Figment: built-in defaults, then an optional TOML file, then
//! `GEOSUGGEST_*` environment variables (nested keys use `__`, e.g.
//! `GEOSUGGEST_REGION__NAME=Tamil Nadu`).

use crate::error::{Result, SuggestError};
use crate::model::BoundingBox;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const ENV_PREFIX: &str = "GEOSUGGEST_";

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

/// Upper bound on the ranked list handed to the UI.
pub const DEFAULT_MAX_RESULTS: usize = 8;

/// The target region: what the geo filter accepts and what the regional
/// query variant appends to the user's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Region label, also the trailing segment of every `display_name`.
    pub name: String,
    /// Comma-separated ISO2 codes passed as the upstream country bias.
    pub country_codes: String,
    pub bbox: BoundingBox,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            name: "Kerala".to_string(),
            country_codes: "in".to_string(),
            bbox: BoundingBox {
                south: 8.17,
                north: 12.79,
                west: 74.85,
                east: 77.42,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    pub endpoint: String,
    /// Sent as `User-Agent`; the public upstream asks for an identifying one.
    pub user_agent: String,
    pub accept_language: String,
    pub debounce_ms: u64,
    /// Inputs shorter than this (in chars, after trimming) never hit the network.
    pub min_query_chars: usize,
    pub max_results: usize,
    /// `limit` parameter of every upstream request.
    pub per_query_limit: usize,
    /// Hard per-request timeout. `None` waits for natural completion.
    pub request_timeout_ms: Option<u64>,
    pub region: RegionConfig,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: concat!("geosuggest-rs/", env!("CARGO_PKG_VERSION")).to_string(),
            accept_language: "en".to_string(),
            debounce_ms: 200,
            min_query_chars: 2,
            max_results: DEFAULT_MAX_RESULTS,
            per_query_limit: 10,
            request_timeout_ms: Some(8_000),
            region: RegionConfig::default(),
        }
    }
}

impl SuggestConfig {
    /// Defaults merged with `GEOSUGGEST_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Defaults, then `path` (if given; a missing file is an error), then env.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(SuggestConfig::default()));
        if let Some(p) = path {
            if !p.exists() {
                return Err(SuggestError::InvalidConfig(format!(
                    "config file not found: {}",
                    p.display()
                )));
            }
            figment = figment.merge(Toml::file(p));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: SuggestConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(SuggestError::InvalidConfig("endpoint is empty".into()));
        }
        if self.max_results == 0 {
            return Err(SuggestError::InvalidConfig(
                "max_results must be at least 1".into(),
            ));
        }
        if self.min_query_chars == 0 {
            return Err(SuggestError::InvalidConfig(
                "min_query_chars must be at least 1".into(),
            ));
        }
        if !self.region.bbox.is_valid() {
            return Err(SuggestError::InvalidConfig(format!(
                "bounding box is inverted or out of range: {:?}",
                self.region.bbox
            )));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}
