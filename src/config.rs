//! Pricing configuration.
//!
//! Fare strategies described in TOML, e.g.
//!
//! ```toml
//! [default]
//! kind = "standard"
//! base-fare = 2.50
//! per-mile-rate = 1.75
//!
//! [fares.rush-hour]
//! kind = "surge"
//! multiplier = 1.8
//! base = { kind = "standard", base-fare = 2.50, per-mile-rate = 1.75 }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::fare::FareStrategy;

/// One fare strategy as written in the config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FareSpec {
    #[serde(rename_all = "kebab-case")]
    Standard { base_fare: f64, per_mile_rate: f64 },
    Surge { base: Box<FareSpec>, multiplier: f64 },
    #[serde(rename_all = "kebab-case")]
    SharedRide {
        base_fare: f64,
        per_mile_rate: f64,
        discount_rate: f64,
    },
}

impl FareSpec {
    /// Validate through the strategy constructors.
    pub fn build(&self) -> Result<FareStrategy, ConfigError> {
        let strategy = match self {
            Self::Standard {
                base_fare,
                per_mile_rate,
            } => FareStrategy::standard(*base_fare, *per_mile_rate)?,
            Self::Surge { base, multiplier } => FareStrategy::surge(base.build()?, *multiplier)?,
            Self::SharedRide {
                base_fare,
                per_mile_rate,
                discount_rate,
            } => FareStrategy::shared_ride(*base_fare, *per_mile_rate, *discount_rate)?,
        };
        Ok(strategy)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PricingConfig {
    /// Strategy for new trips when no named fare is asked for.
    pub default: FareSpec,
    #[serde(default)]
    pub fares: BTreeMap<String, FareSpec>,
}

impl PricingConfig {
    /// Parse and validate every strategy in `contents`.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;

        config.default.build()?;
        for (name, spec) in &config.fares {
            spec.build().inspect_err(|err| {
                tracing::warn!(fare = name.as_str(), error = %err, "invalid fare in pricing config");
            })?;
        }

        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), fares = config.fares.len(), "pricing config loaded");
        Ok(config)
    }

    pub fn default_strategy(&self) -> Result<FareStrategy, ConfigError> {
        self.default.build()
    }

    pub fn strategy(&self, name: &str) -> Result<FareStrategy, ConfigError> {
        self.fares
            .get(name)
            .ok_or_else(|| ConfigError::UnknownFare(name.to_owned()))?
            .build()
    }
}
