//! Carbon-saved estimation, injected into the ledger.
//!
//! The ledger calls the estimator when a manifest settles. Any
//! `Fn(&str, &str) -> Decimal` works; [`EmissionFactorEstimator`] is the
//! configurable default: quantity in kg times a per-material emission
//! factor (kg CO2e avoided per kg diverted).

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::{Result, SymbiosisError};
use crate::types::quantity::{parse_quantity_label, round_cents, to_kg};
use crate::types::{Material, MaterialCategory};

/// Estimates kg CO2 avoided for a settled exchange. Must be deterministic.
pub trait CarbonEstimator {
    fn estimate(&self, material: &str, quantity_label: &str) -> Decimal;
}

impl<F> CarbonEstimator for F
where
    F: Fn(&str, &str) -> Decimal,
{
    fn estimate(&self, material: &str, quantity_label: &str) -> Decimal {
        self(material, quantity_label)
    }
}

/// Emission factors keyed by material category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmissionFactorEstimator {
    factors: BTreeMap<MaterialCategory, Decimal>,
    default_factor: Decimal,
}

impl Default for EmissionFactorEstimator {
    fn default() -> Self {
        let factors = [
            (MaterialCategory::Plastic, Decimal::new(15, 1)),
            (MaterialCategory::Organic, Decimal::new(5, 1)),
            (MaterialCategory::Textile, Decimal::new(9, 1)),
            (MaterialCategory::Metal, Decimal::new(20, 1)),
            (MaterialCategory::Electronic, Decimal::new(25, 1)),
            (MaterialCategory::Rubber, Decimal::new(12, 1)),
            (MaterialCategory::Glass, Decimal::new(3, 1)),
            (MaterialCategory::Chemical, Decimal::new(10, 1)),
            (MaterialCategory::Construction, Decimal::new(5, 2)),
            (MaterialCategory::Wood, Decimal::new(4, 1)),
            (MaterialCategory::Energy, Decimal::new(2, 1)),
        ];
        Self {
            factors: factors.into_iter().collect(),
            default_factor: Decimal::new(5, 1),
        }
    }
}

impl EmissionFactorEstimator {
    /// No per-category factors; everything uses `default_factor`
    pub fn new(default_factor: Decimal) -> Self {
        Self {
            factors: BTreeMap::new(),
            default_factor,
        }
    }

    pub fn with_factor(mut self, category: MaterialCategory, factor: Decimal) -> Self {
        self.factors.insert(category, factor);
        self
    }

    /// Built-in factor table with `default_factor` for everything it does
    /// not list
    ///
    /// # Errors
    ///
    /// `Config` if `default_factor` is negative.
    pub fn builtin(default_factor: Decimal) -> Result<Self> {
        check_default_factor(default_factor)?;
        Ok(Self {
            default_factor,
            ..Self::default()
        })
    }

    /// Build from config entries keyed by category key or label
    ///
    /// # Errors
    ///
    /// `Config` if a key names no known category or a factor is negative.
    pub fn from_entries<'a, I>(default_factor: Decimal, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a Decimal)>,
    {
        check_default_factor(default_factor)?;
        let mut estimator = Self::new(default_factor);
        for (key, factor) in entries {
            let category = MaterialCategory::lookup(key)
                .ok_or_else(|| SymbiosisError::Config(format!("unknown material category '{key}'")))?;
            if factor.is_sign_negative() {
                return Err(SymbiosisError::Config(format!(
                    "emission factor for '{key}' must not be negative, got {factor}"
                )));
            }
            estimator.factors.insert(category, *factor);
        }
        Ok(estimator)
    }

    pub fn factor_for(&self, material: &str) -> Decimal {
        Material::parse(material)
            .category()
            .and_then(|category| self.factors.get(&category).copied())
            .unwrap_or(self.default_factor)
    }
}

fn check_default_factor(default_factor: Decimal) -> Result<()> {
    if default_factor.is_sign_negative() {
        return Err(SymbiosisError::Config(format!(
            "default emission factor must not be negative, got {default_factor}"
        )));
    }
    Ok(())
}

impl CarbonEstimator for EmissionFactorEstimator {
    /// Unparseable labels or custom units estimate zero
    fn estimate(&self, material: &str, quantity_label: &str) -> Decimal {
        let Some((amount, unit)) = parse_quantity_label(quantity_label) else {
            return Decimal::ZERO;
        };
        let Some(kg) = to_kg(amount, &unit) else {
            return Decimal::ZERO;
        };
        kg.checked_mul(self.factor_for(material))
            .map(round_cents)
            .unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_factors() {
        let estimator = EmissionFactorEstimator::default();
        assert_eq!(estimator.estimate("Plastic Packaging", "200 kg"), Decimal::from(300));
        assert_eq!(estimator.estimate("Scrap Metal", "1 ton"), Decimal::from(2000));
        // Custom materials use the default factor
        assert_eq!(estimator.estimate("Cardboard", "500 kg"), Decimal::from(250));
    }

    #[test]
    fn test_unparseable_labels_estimate_zero() {
        let estimator = EmissionFactorEstimator::default();
        assert_eq!(estimator.estimate("Cardboard", "a truckload"), Decimal::ZERO);
        assert_eq!(estimator.estimate("Cardboard", "3 bales"), Decimal::ZERO);
    }

    #[test]
    fn test_closure_estimator() {
        let flat = |_: &str, _: &str| Decimal::from(42);
        assert_eq!(flat.estimate("anything", "1 kg"), Decimal::from(42));
    }

    #[test]
    fn test_from_entries() {
        let mut entries = BTreeMap::new();
        entries.insert("glass".to_string(), Decimal::ONE);
        let estimator = EmissionFactorEstimator::from_entries(Decimal::ZERO, &entries).unwrap();
        assert_eq!(estimator.estimate("Glass Cullet", "10 kg"), Decimal::from(10));
        assert_eq!(estimator.estimate("Wood/Pallets", "10 kg"), Decimal::ZERO);

        entries.insert("kryptonite".to_string(), Decimal::ONE);
        assert!(EmissionFactorEstimator::from_entries(Decimal::ZERO, &entries).is_err());
    }

    #[test]
    fn test_negative_default_factor_rejected() {
        let entries: BTreeMap<String, Decimal> = BTreeMap::new();
        let err = EmissionFactorEstimator::from_entries(Decimal::from(-1), &entries).unwrap_err();
        assert!(matches!(err, SymbiosisError::Config(_)));
        let err = EmissionFactorEstimator::builtin(Decimal::from(-1)).unwrap_err();
        assert!(matches!(err, SymbiosisError::Config(_)));
    }

    #[test]
    fn test_builtin_keeps_table_with_custom_default() {
        let estimator = EmissionFactorEstimator::builtin(Decimal::from(2)).unwrap();
        assert_eq!(estimator.factor_for("Cardboard"), Decimal::from(2));
        assert_eq!(estimator.factor_for("Plastic Packaging"), Decimal::new(15, 1));
    }
}
