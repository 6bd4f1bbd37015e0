//! Engine configuration
//!
//! Loaded from TOML; every field has a default so an empty file (or no file
//! at all) yields a working setup.
//!
//! ```toml
//! [matching]
//! default_limit = 3
//! default_rate = 15
//!
//! [matching.rates]
//! plastic = 45
//! metal = "150.50"
//!
//! [carbon]
//! default_factor = 0.5
//!
//! [carbon.factors]
//! glass = 0.3
//!
//! [impact]
//! savings_rate_per_kg = 12
//! currency_symbol = "₹"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::matcher::DEFAULT_LIMIT;
use crate::engine::rates::DEFAULT_RATE_PER_UNIT;
use crate::engine::{MatchingEngine, RateTable};
use crate::error::{Result, SymbiosisError};
use crate::ledger::{EmissionFactorEstimator, Ledger};
use crate::types::MaterialCategory;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub carbon: CarbonConfig,
    #[serde(default)]
    pub impact: ImpactConfig,
}

/// Match ranking and benefit estimation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Matches returned per request
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Rate for materials without an entry in `rates`
    #[serde(default = "default_rate")]
    pub default_rate: Decimal,

    /// Rate per unit, keyed by category key or label
    #[serde(default = "default_rates")]
    pub rates: BTreeMap<String, Decimal>,
}

/// Carbon-saved estimation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbonConfig {
    /// kg CO2e per kg for materials without an entry in `factors`
    #[serde(default = "default_factor")]
    pub default_factor: Decimal,

    /// kg CO2e avoided per kg diverted, keyed by category key or label.
    /// Empty means the built-in factor table (still using `default_factor`).
    #[serde(default)]
    pub factors: BTreeMap<String, Decimal>,
}

/// Dashboard impact figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactConfig {
    #[serde(default = "default_savings_rate")]
    pub savings_rate_per_kg: Decimal,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

// Defaults
fn default_limit() -> usize { DEFAULT_LIMIT }
fn default_rate() -> Decimal { Decimal::from(DEFAULT_RATE_PER_UNIT) }
fn default_factor() -> Decimal { Decimal::new(5, 1) }
fn default_savings_rate() -> Decimal { Decimal::from(12) }
fn default_currency() -> String { "₹".to_string() }
fn default_rates() -> BTreeMap<String, Decimal> {
    [
        (MaterialCategory::Plastic, 45),
        (MaterialCategory::Organic, 5),
        (MaterialCategory::Textile, 20),
        (MaterialCategory::Metal, 150),
    ]
    .into_iter()
    .map(|(category, rate)| (category.key().to_string(), Decimal::from(rate)))
    .collect()
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            default_rate: default_rate(),
            rates: default_rates(),
        }
    }
}

impl Default for CarbonConfig {
    fn default() -> Self {
        Self {
            default_factor: default_factor(),
            factors: BTreeMap::new(),
        }
    }
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            savings_rate_per_kg: default_savings_rate(),
            currency_symbol: default_currency(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from `path` if it exists, otherwise defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.matching.default_limit < 1 {
            return Err(SymbiosisError::Config("matching.default_limit must be at least 1".to_string()));
        }
        if self.carbon.default_factor.is_sign_negative() {
            return Err(SymbiosisError::Config("carbon.default_factor must not be negative".to_string()));
        }
        if self.impact.savings_rate_per_kg.is_sign_negative() {
            return Err(SymbiosisError::Config("impact.savings_rate_per_kg must not be negative".to_string()));
        }
        self.rate_table()?;
        self.estimator()?;
        Ok(())
    }

    pub fn rate_table(&self) -> Result<RateTable> {
        RateTable::from_entries(self.matching.default_rate, &self.matching.rates)
    }

    pub fn estimator(&self) -> Result<EmissionFactorEstimator> {
        if self.carbon.factors.is_empty() {
            return EmissionFactorEstimator::builtin(self.carbon.default_factor);
        }
        EmissionFactorEstimator::from_entries(self.carbon.default_factor, &self.carbon.factors)
    }

    pub fn matching_engine(&self) -> Result<MatchingEngine> {
        Ok(MatchingEngine::with_rates(self.rate_table()?))
    }

    /// Empty ledger wired to the configured estimator
    pub fn ledger(&self) -> Result<Ledger> {
        Ok(Ledger::new(self.estimator()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Material;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.matching.default_limit, 3);
        assert_eq!(config.rate_table().unwrap(), RateTable::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml_str(
            r#"
            [matching]
            default_limit = 5
            default_rate = 10

            [matching.rates]
            plastic = 40
            "Scrap Metal" = "150.50"

            [carbon]
            default_factor = "0.25"

            [carbon.factors]
            glass = 1

            [impact]
            savings_rate_per_kg = 8
            currency_symbol = "$"
            "#,
        )
        .unwrap();

        assert_eq!(config.matching.default_limit, 5);
        let rates = config.rate_table().unwrap();
        assert_eq!(rates.rate_for(&Material::parse("Scrap Metal")), Decimal::new(15050, 2));
        assert_eq!(rates.rate_for(&Material::parse("Wood/Pallets")), Decimal::from(10));

        let estimator = config.estimator().unwrap();
        assert_eq!(estimator.factor_for("Glass Cullet"), Decimal::ONE);
        assert_eq!(estimator.factor_for("Cardboard"), Decimal::new(25, 2));
        assert_eq!(config.impact.currency_symbol, "$");
    }

    #[test]
    fn test_default_factor_applies_to_builtin_table() {
        let config = Config::from_toml_str("[carbon]\ndefault_factor = \"2\"\n").unwrap();
        let estimator = config.estimator().unwrap();
        assert_eq!(estimator.factor_for("Cardboard"), Decimal::from(2));
        assert_eq!(estimator.factor_for("Glass Cullet"), Decimal::new(3, 1));
    }

    #[test]
    fn test_unknown_category_is_config_error() {
        let err = Config::from_toml_str("[matching.rates]\nunobtainium = 3\n").unwrap_err();
        assert!(matches!(err, SymbiosisError::Config(_)));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = Config::from_toml_str("[matching]\ndefault_limit = 0\n").unwrap_err();
        assert!(matches!(err, SymbiosisError::Config(_)));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
