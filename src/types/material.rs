//! Material categories and quantity units.
//!
//! Both follow the same shape: a closed enumeration plus an escape hatch
//! carrying caller-supplied text. `Material::Custom` replaces the magic
//! "Other" category; `Unit::Custom` covers units outside the known set.
//!
//! Both serialize as their display text and parse back losslessly for every
//! known value.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::quantity::KG_PER_TON;

// ============================================================================
// MaterialCategory
// ============================================================================

/// Closed set of material categories traded on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialCategory {
    Plastic,
    Organic,
    Textile,
    Metal,
    Electronic,
    Rubber,
    Glass,
    Chemical,
    Construction,
    Wood,
    Energy,
}

impl MaterialCategory {
    /// Every category, in declaration order
    pub const ALL: [MaterialCategory; 11] = [
        MaterialCategory::Plastic,
        MaterialCategory::Organic,
        MaterialCategory::Textile,
        MaterialCategory::Metal,
        MaterialCategory::Electronic,
        MaterialCategory::Rubber,
        MaterialCategory::Glass,
        MaterialCategory::Chemical,
        MaterialCategory::Construction,
        MaterialCategory::Wood,
        MaterialCategory::Energy,
    ];

    /// Display label shown to marketplace users
    pub fn label(self) -> &'static str {
        match self {
            MaterialCategory::Plastic => "Plastic Packaging",
            MaterialCategory::Organic => "Organic/Food Residue",
            MaterialCategory::Textile => "Paper/Cotton Scrap",
            MaterialCategory::Metal => "Scrap Metal",
            MaterialCategory::Electronic => "E-Waste",
            MaterialCategory::Rubber => "Rubber/Tyres",
            MaterialCategory::Glass => "Glass Cullet",
            MaterialCategory::Chemical => "Chemical By-products",
            MaterialCategory::Construction => "Construction Debris",
            MaterialCategory::Wood => "Wood/Pallets",
            MaterialCategory::Energy => "Waste Heat/Energy",
        }
    }

    /// Short key used in configuration tables (`plastic`, `e_waste`, ...)
    pub fn key(self) -> &'static str {
        match self {
            MaterialCategory::Plastic => "plastic",
            MaterialCategory::Organic => "organic",
            MaterialCategory::Textile => "textile",
            MaterialCategory::Metal => "metal",
            MaterialCategory::Electronic => "electronic",
            MaterialCategory::Rubber => "rubber",
            MaterialCategory::Glass => "glass",
            MaterialCategory::Chemical => "chemical",
            MaterialCategory::Construction => "construction",
            MaterialCategory::Wood => "wood",
            MaterialCategory::Energy => "energy",
        }
    }

    /// Look up a category by its display label or config key, ignoring case
    /// and surrounding whitespace.
    pub fn lookup(text: &str) -> Option<Self> {
        let needle = text.trim();
        Self::ALL.into_iter().find(|category| {
            category.label().eq_ignore_ascii_case(needle) || category.key().eq_ignore_ascii_case(needle)
        })
    }

    /// Broad grouping used for partial material compatibility
    pub fn group(self) -> Option<MaterialGroup> {
        match self {
            MaterialCategory::Plastic | MaterialCategory::Rubber => Some(MaterialGroup::Synthetic),
            MaterialCategory::Organic | MaterialCategory::Wood | MaterialCategory::Textile => {
                Some(MaterialGroup::Biological)
            }
            MaterialCategory::Metal | MaterialCategory::Electronic => Some(MaterialGroup::Metallic),
            MaterialCategory::Glass | MaterialCategory::Construction => Some(MaterialGroup::Mineral),
            MaterialCategory::Chemical | MaterialCategory::Energy => None,
        }
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Broad families of interchangeable materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialGroup {
    /// Polymers: plastics and rubber
    Synthetic,
    /// Plant and food derived streams
    Biological,
    /// Recoverable metals, including e-waste
    Metallic,
    /// Glass and aggregate
    Mineral,
}

impl MaterialGroup {
    pub fn label(self) -> &'static str {
        match self {
            MaterialGroup::Synthetic => "synthetic",
            MaterialGroup::Biological => "biological",
            MaterialGroup::Metallic => "metallic",
            MaterialGroup::Mineral => "mineral",
        }
    }
}

// ============================================================================
// Material
// ============================================================================

/// A listing's material: a known category or caller-supplied text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Material {
    Known(MaterialCategory),
    Custom(String),
}

impl Material {
    /// Parse free text; known category labels become [`Material::Known`].
    pub fn parse(text: &str) -> Self {
        match MaterialCategory::lookup(text) {
            Some(category) => Material::Known(category),
            None => Material::Custom(text.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Material::Known(category) => category.label(),
            Material::Custom(text) => text,
        }
    }

    pub fn category(&self) -> Option<MaterialCategory> {
        match self {
            Material::Known(category) => Some(*category),
            Material::Custom(_) => None,
        }
    }

    pub fn group(&self) -> Option<MaterialGroup> {
        self.category().and_then(MaterialCategory::group)
    }

    /// Exact match: same category, or custom text equal ignoring case.
    pub fn is_same_as(&self, other: &Material) -> bool {
        match (self, other) {
            (Material::Known(a), Material::Known(b)) => a == b,
            (Material::Custom(a), Material::Custom(b)) => {
                let a = a.trim();
                !a.is_empty() && a.eq_ignore_ascii_case(b.trim())
            }
            _ => false,
        }
    }
}

impl From<MaterialCategory> for Material {
    fn from(category: MaterialCategory) -> Self {
        Material::Known(category)
    }
}

impl From<String> for Material {
    fn from(text: String) -> Self {
        Material::parse(&text)
    }
}

impl From<Material> for String {
    fn from(material: Material) -> Self {
        material.label().to_string()
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Unit
// ============================================================================

/// Unit a listing quantity is expressed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    #[default]
    Kg,
    Tons,
    Liters,
    Units,
    Custom(String),
}

impl Unit {
    /// Parse a unit, accepting common spellings (`kgs`, `tonne`, `litres`).
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => Unit::Kg,
            "t" | "ton" | "tons" | "tonne" | "tonnes" => Unit::Tons,
            "l" | "liter" | "liters" | "litre" | "litres" => Unit::Liters,
            "unit" | "units" | "pcs" | "pieces" => Unit::Units,
            _ => Unit::Custom(trimmed.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Unit::Kg => "kg",
            Unit::Tons => "tons",
            Unit::Liters => "liters",
            Unit::Units => "units",
            Unit::Custom(text) => text,
        }
    }

    /// Kilograms per one of this unit, for mass units only
    pub fn kg_factor(&self) -> Option<Decimal> {
        match self {
            Unit::Kg => Some(Decimal::ONE),
            Unit::Tons => Some(Decimal::from(KG_PER_TON)),
            _ => None,
        }
    }

    /// Same unit, with custom text compared ignoring case
    pub fn is_same_as(&self, other: &Unit) -> bool {
        match (self, other) {
            (Unit::Custom(a), Unit::Custom(b)) => a.trim().eq_ignore_ascii_case(b.trim()),
            _ => self == other,
        }
    }
}

impl From<String> for Unit {
    fn from(text: String) -> Self {
        Unit::parse(&text)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.label().to_string()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_lookup_by_label_and_key() {
        assert_eq!(MaterialCategory::lookup("Plastic Packaging"), Some(MaterialCategory::Plastic));
        assert_eq!(MaterialCategory::lookup("  scrap metal "), Some(MaterialCategory::Metal));
        assert_eq!(MaterialCategory::lookup("wood"), Some(MaterialCategory::Wood));
        assert_eq!(MaterialCategory::lookup("Cardboard"), None);
    }

    #[test]
    fn test_every_label_round_trips() {
        for category in MaterialCategory::ALL {
            assert_eq!(Material::parse(category.label()), Material::Known(category));
        }
    }

    #[test]
    fn test_groups() {
        assert_eq!(MaterialCategory::Plastic.group(), MaterialCategory::Rubber.group());
        assert_eq!(MaterialCategory::Organic.group(), Some(MaterialGroup::Biological));
        assert_eq!(MaterialCategory::Wood.group(), Some(MaterialGroup::Biological));
        assert_eq!(MaterialCategory::Chemical.group(), None);
    }

    #[test]
    fn test_custom_material() {
        let material = Material::parse(" Cardboard ");
        assert_eq!(material, Material::Custom("Cardboard".to_string()));
        assert!(material.is_same_as(&Material::parse("cardboard")));
        assert!(!material.is_same_as(&Material::Known(MaterialCategory::Textile)));
        assert!(!Material::Custom(String::new()).is_same_as(&Material::Custom(String::new())));
    }

    #[test]
    fn test_material_serializes_as_label() {
        let json = serde_json::to_string(&Material::Known(MaterialCategory::Glass)).unwrap();
        assert_eq!(json, "\"Glass Cullet\"");
        let back: Material = serde_json::from_str("\"Fly Ash\"").unwrap();
        assert_eq!(back, Material::Custom("Fly Ash".to_string()));
    }

    #[test]
    fn test_unit_parse() {
        assert_eq!(Unit::parse("KG"), Unit::Kg);
        assert_eq!(Unit::parse("tonnes"), Unit::Tons);
        assert_eq!(Unit::parse("litres"), Unit::Liters);
        assert_eq!(Unit::parse("bales"), Unit::Custom("bales".to_string()));
        assert!(Unit::parse("Bales").is_same_as(&Unit::parse("bales")));
    }

    #[test]
    fn test_unit_kg_factor() {
        assert_eq!(Unit::Tons.kg_factor(), Some(Decimal::from(1000)));
        assert_eq!(Unit::Liters.kg_factor(), None);
    }
}
