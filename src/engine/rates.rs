//! Reference rates used to estimate the monetary benefit of a match.
//!
//! The table is configuration supplied by the caller; the engine only reads
//! it. Materials without an explicit rate (including every custom material)
//! fall back to the table's default rate.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::{Result, SymbiosisError};
use crate::types::{Material, MaterialCategory};

/// Fallback rate per unit when nothing more specific is configured
pub const DEFAULT_RATE_PER_UNIT: u64 = 15;

/// Per-category reference rate (currency per unit of quantity).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    rates: BTreeMap<MaterialCategory, Decimal>,
    default_rate: Decimal,
}

impl Default for RateTable {
    /// Reference rates observed on the marketplace's seed listings
    fn default() -> Self {
        Self::new(Decimal::from(DEFAULT_RATE_PER_UNIT))
            .with_rate(MaterialCategory::Plastic, Decimal::from(45))
            .with_rate(MaterialCategory::Organic, Decimal::from(5))
            .with_rate(MaterialCategory::Textile, Decimal::from(20))
            .with_rate(MaterialCategory::Metal, Decimal::from(150))
    }
}

impl RateTable {
    /// An empty table where every material uses `default_rate`
    pub fn new(default_rate: Decimal) -> Self {
        Self {
            rates: BTreeMap::new(),
            default_rate,
        }
    }

    pub fn with_rate(mut self, category: MaterialCategory, rate: Decimal) -> Self {
        self.rates.insert(category, rate);
        self
    }

    /// Build a table from config entries keyed by category key or label
    ///
    /// # Errors
    ///
    /// `Config` if a key names no known category or a rate is negative.
    pub fn from_entries<'a, I>(default_rate: Decimal, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a Decimal)>,
    {
        if default_rate.is_sign_negative() {
            return Err(SymbiosisError::Config(format!(
                "default rate must not be negative, got {default_rate}"
            )));
        }
        let mut table = Self::new(default_rate);
        for (key, rate) in entries {
            let category = MaterialCategory::lookup(key)
                .ok_or_else(|| SymbiosisError::Config(format!("unknown material category '{key}'")))?;
            if rate.is_sign_negative() {
                return Err(SymbiosisError::Config(format!(
                    "rate for '{key}' must not be negative, got {rate}"
                )));
            }
            table.rates.insert(category, *rate);
        }
        Ok(table)
    }

    /// Rate applied to `material`
    pub fn rate_for(&self, material: &Material) -> Decimal {
        material
            .category()
            .and_then(|category| self.rates.get(&category).copied())
            .unwrap_or(self.default_rate)
    }

    pub fn default_rate(&self) -> Decimal {
        self.default_rate
    }
}
