//! Listing types: a posted material offer or request.
//!
//! A listing is immutable once posted. The only way to "edit" one is to
//! delete it and post a replacement, so none of the fields have setters
//! beyond the builder-style helpers used while constructing it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SymbiosisError};
use crate::types::quantity::format_amount;
use crate::types::{Material, Unit};

// ============================================================================
// Direction enum
// ============================================================================

/// Which side of an exchange a listing is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// "I have waste to sell or give away"
    #[default]
    Offer,
    /// "I need raw material"
    Request,
}

impl Direction {
    /// Returns the direction a compatible counterpart must have
    pub fn opposite(self) -> Self {
        match self {
            Direction::Offer => Direction::Request,
            Direction::Request => Direction::Offer,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Offer => "OFFER",
            Direction::Request => "REQUEST",
        }
    }
}

// ============================================================================
// Listing struct
// ============================================================================

/// One posted material offer or request.
///
/// ## Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
/// use symbiosis_core::types::{Direction, Listing, Material, Unit};
///
/// let listing = Listing::new(
///     "l2",
///     "u3",
///     Direction::Request,
///     Material::parse("Plastic Packaging"),
///     Decimal::from(2),
///     Unit::Tons,
///     "Gurugram, Haryana",
///     Utc.with_ymd_and_hms(2023, 10, 26, 0, 0, 0).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(listing.city(), "Gurugram");
/// assert_eq!(listing.quantity_label(), "2 tons");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Unique listing identifier
    pub id: String,

    /// Identifier of the posting business
    pub owner_id: String,

    /// Display name of the posting business
    #[serde(default)]
    pub company_name: String,

    pub direction: Direction,

    pub material: Material,

    /// Always positive
    pub quantity: Decimal,

    pub unit: Unit,

    /// Asking (or offered) price per unit; zero when free
    #[serde(default)]
    pub price_per_unit: Decimal,

    /// Free text, interpreted as `"<city>, <region>"`
    pub location: String,

    #[serde(default)]
    pub description: String,

    pub posted_at: DateTime<Utc>,
}

impl Listing {
    /// Create a listing, rejecting non-positive quantities
    ///
    /// `company_name` defaults to the owner id.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        direction: Direction,
        material: Material,
        quantity: Decimal,
        unit: Unit,
        location: impl Into<String>,
        posted_at: DateTime<Utc>,
    ) -> Result<Self> {
        let id = id.into();
        if quantity <= Decimal::ZERO {
            return Err(SymbiosisError::InvalidInput(format!(
                "listing {id} must have a positive quantity, got {quantity}"
            )));
        }
        let owner_id = owner_id.into();

        Ok(Self {
            id,
            company_name: owner_id.clone(),
            owner_id,
            direction,
            material,
            quantity,
            unit,
            price_per_unit: Decimal::ZERO,
            location: location.into(),
            description: String::new(),
            posted_at,
        })
    }

    pub fn with_company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = name.into();
        self
    }

    pub fn with_price_per_unit(mut self, price: Decimal) -> Self {
        self.price_per_unit = price;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check the invariants a deserialized listing may have skipped
    pub fn validate(&self) -> Result<()> {
        if self.quantity <= Decimal::ZERO {
            return Err(SymbiosisError::InvalidInput(format!(
                "listing {} must have a positive quantity, got {}",
                self.id, self.quantity
            )));
        }
        Ok(())
    }

    /// City part of the location: text before the first comma, trimmed
    pub fn city(&self) -> &str {
        self.location.split(',').next().unwrap_or_default().trim()
    }

    /// Region part of the location: text after the first comma, if any
    pub fn region(&self) -> Option<&str> {
        let (_, region) = self.location.split_once(',')?;
        let region = region.trim();
        (!region.is_empty()).then_some(region)
    }

    /// `"<quantity> <unit>"`, as recorded on manifests
    pub fn quantity_label(&self) -> String {
        format!("{} {}", format_amount(self.quantity), self.unit)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MaterialCategory;
    use chrono::TimeZone;

    fn listing(location: &str) -> Listing {
        Listing::new(
            "l1",
            "u2",
            Direction::Offer,
            Material::Known(MaterialCategory::Textile),
            Decimal::from(500),
            Unit::Kg,
            location,
            Utc.with_ymd_and_hms(2023, 10, 25, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_direction_opposite() {
        assert_eq!(Direction::Offer.opposite(), Direction::Request);
        assert_eq!(Direction::Request.opposite(), Direction::Offer);
    }

    #[test]
    fn test_direction_serde() {
        assert_eq!(serde_json::to_string(&Direction::Request).unwrap(), "\"REQUEST\"");
    }

    #[test]
    fn test_listing_new() {
        let listing = listing("Panipat, Haryana");
        assert_eq!(listing.id, "l1");
        assert_eq!(listing.owner_id, "u2");
        assert_eq!(listing.company_name, "u2");
        assert_eq!(listing.direction, Direction::Offer);
        assert_eq!(listing.price_per_unit, Decimal::ZERO);
        assert!(listing.validate().is_ok());
    }

    #[test]
    fn test_listing_rejects_non_positive_quantity() {
        let result = Listing::new(
            "bad",
            "u1",
            Direction::Offer,
            Material::parse("Scrap Metal"),
            Decimal::ZERO,
            Unit::Kg,
            "Manesar, Haryana",
            Utc::now(),
        );
        assert!(matches!(result, Err(SymbiosisError::InvalidInput(_))));
    }

    #[test]
    fn test_location_parts() {
        let full = listing("  Noida , UP ");
        assert_eq!(full.city(), "Noida");
        assert_eq!(full.region(), Some("UP"));

        let city_only = listing("Panipat");
        assert_eq!(city_only.city(), "Panipat");
        assert_eq!(city_only.region(), None);

        let trailing_comma = listing("Panipat,");
        assert_eq!(trailing_comma.region(), None);
    }

    #[test]
    fn test_quantity_label() {
        let listing = listing("Panipat, Haryana");
        assert_eq!(listing.quantity_label(), "500 kg");
    }

    #[test]
    fn test_builders() {
        let listing = listing("Panipat, Haryana")
            .with_company_name("Alpha Textiles")
            .with_price_per_unit(Decimal::from(20))
            .with_description("Cotton scraps from denim production.");
        assert_eq!(listing.company_name, "Alpha Textiles");
        assert_eq!(listing.price_per_unit, Decimal::from(20));
        assert!(listing.description.starts_with("Cotton"));
    }
}
