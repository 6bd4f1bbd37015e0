//! Compatibility scoring between a subject listing and one candidate.
//!
//! ## Sub-scores
//!
//! | Sub-score | Weight | Full marks | Partial | Zero |
//! |-----------|--------|------------|---------|------|
//! | material  | 0.5    | same material | same broad group (40) | otherwise |
//! | location  | 0.3    | same city | same region (50) | otherwise |
//! | quantity  | 0.2    | equal amounts | `100 * (1 - diff / max)` | - |
//!
//! Quantities in units with no conversion between them score a flat 50:
//! a proportional comparison across unrelated units means nothing.
//!
//! Every value is a [`Decimal`], so identical inputs always give identical
//! scores and reasons.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::quantity::{clamp_score, round_whole, SCORE_MAX};
use crate::types::{Listing, MaterialGroup, Unit};

/// Weight of the material sub-score (0.5)
pub const MATERIAL_WEIGHT: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Weight of the location sub-score (0.3)
pub const LOCATION_WEIGHT: Decimal = Decimal::from_parts(3, 0, 0, false, 1);

/// Weight of the quantity sub-score (0.2)
pub const QUANTITY_WEIGHT: Decimal = Decimal::from_parts(2, 0, 0, false, 1);

/// Material score for two materials in the same broad group
pub const RELATED_MATERIAL_SCORE: u8 = 40;

/// Location score for listings in the same region but different cities
pub const SAME_REGION_SCORE: u8 = 50;

/// Quantity score when units cannot be compared
pub const INCOMPARABLE_QUANTITY_SCORE: u8 = 50;

/// Quantity score at or above which amounts count as aligned
const ALIGNED_QUANTITY_SCORE: u8 = 90;

// ============================================================================
// Affinities
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterialAffinity {
    Exact,
    Related(MaterialGroup),
    Unrelated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationAffinity {
    SameCity(String),
    SameRegion(String),
    Distant,
}

/// The three sub-scores behind a match score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub material: u8,
    pub location: u8,
    pub quantity: u8,
}

impl ScoreBreakdown {
    /// Weighted combination, rounded half away from zero and clamped to 0..=100
    pub fn combined(&self) -> u8 {
        let weighted = MATERIAL_WEIGHT * Decimal::from(self.material)
            + LOCATION_WEIGHT * Decimal::from(self.location)
            + QUANTITY_WEIGHT * Decimal::from(self.quantity);
        clamp_score(weighted)
    }
}

/// Full comparison of one candidate against the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub material: MaterialAffinity,
    pub location: LocationAffinity,
    /// `false` when the units had no conversion between them
    pub quantities_comparable: bool,
    pub breakdown: ScoreBreakdown,
}

impl Assessment {
    /// Compare `candidate` against `subject`
    pub fn of(subject: &Listing, candidate: &Listing) -> Self {
        let material = material_affinity(subject, candidate);
        let location = location_affinity(subject, candidate);
        let quantity = quantity_score(subject, candidate);

        let breakdown = ScoreBreakdown {
            material: material_score(&material),
            location: location_score(&location),
            quantity: quantity.unwrap_or(INCOMPARABLE_QUANTITY_SCORE),
        };

        Self {
            material,
            location,
            quantities_comparable: quantity.is_some(),
            breakdown,
        }
    }

    pub fn score(&self) -> u8 {
        self.breakdown.combined()
    }

    /// Explanation citing each sub-score, derived only from the inputs
    pub fn reason(&self, subject: &Listing, candidate: &Listing) -> String {
        let material = match &self.material {
            MaterialAffinity::Exact => format!("Exact material match on {}", candidate.material),
            MaterialAffinity::Related(group) => format!(
                "Related {} material ({} for {})",
                group.label(),
                candidate.material,
                subject.material
            ),
            MaterialAffinity::Unrelated => {
                format!("Different material stream ({})", candidate.material)
            }
        };

        let location = match &self.location {
            LocationAffinity::SameCity(city) => format!("same city ({city})"),
            LocationAffinity::SameRegion(region) => format!("same region ({region})"),
            LocationAffinity::Distant => format!("located in {}", candidate.location.trim()),
        };

        let amounts = format!("{} vs {}", candidate.quantity_label(), subject.quantity_label());
        let quantity = if !self.quantities_comparable {
            format!("quantities in different units ({amounts})")
        } else if self.breakdown.quantity >= ALIGNED_QUANTITY_SCORE {
            format!("closely aligned quantities ({amounts})")
        } else if self.breakdown.quantity >= INCOMPARABLE_QUANTITY_SCORE {
            format!("partial quantity overlap ({amounts})")
        } else {
            format!("quantity mismatch ({amounts})")
        };

        format!("{material}; {location}; {quantity}")
    }
}

// ============================================================================
// Sub-scores
// ============================================================================

pub fn material_affinity(subject: &Listing, candidate: &Listing) -> MaterialAffinity {
    if subject.material.is_same_as(&candidate.material) {
        return MaterialAffinity::Exact;
    }
    match (subject.material.group(), candidate.material.group()) {
        (Some(a), Some(b)) if a == b => MaterialAffinity::Related(a),
        _ => MaterialAffinity::Unrelated,
    }
}

pub fn material_score(affinity: &MaterialAffinity) -> u8 {
    match affinity {
        MaterialAffinity::Exact => SCORE_MAX,
        MaterialAffinity::Related(_) => RELATED_MATERIAL_SCORE,
        MaterialAffinity::Unrelated => 0,
    }
}

/// Case-insensitive equality of two non-empty place names
fn same_place(a: &str, b: &str) -> bool {
    !a.is_empty() && a.to_lowercase() == b.to_lowercase()
}

pub fn location_affinity(subject: &Listing, candidate: &Listing) -> LocationAffinity {
    let city = candidate.city();
    if same_place(subject.city(), city) {
        return LocationAffinity::SameCity(city.to_string());
    }
    match (subject.region(), candidate.region()) {
        (Some(a), Some(b)) if same_place(a, b) => LocationAffinity::SameRegion(b.to_string()),
        _ => LocationAffinity::Distant,
    }
}

pub fn location_score(affinity: &LocationAffinity) -> u8 {
    match affinity {
        LocationAffinity::SameCity(_) => SCORE_MAX,
        LocationAffinity::SameRegion(_) => SAME_REGION_SCORE,
        LocationAffinity::Distant => 0,
    }
}

/// Express both quantities in a shared unit, if one exists
fn common_amounts(subject: &Listing, candidate: &Listing) -> Option<(Decimal, Decimal)> {
    if subject.unit.is_same_as(&candidate.unit) {
        return Some((subject.quantity, candidate.quantity));
    }
    let (a, b) = match (&subject.unit, &candidate.unit) {
        (Unit::Custom(_), _) | (_, Unit::Custom(_)) => return None,
        (a, b) => (a.kg_factor()?, b.kg_factor()?),
    };
    Some((subject.quantity.checked_mul(a)?, candidate.quantity.checked_mul(b)?))
}

/// `100 * (1 - |a - b| / max(a, b))`, or `None` when units are incomparable
pub fn quantity_score(subject: &Listing, candidate: &Listing) -> Option<u8> {
    let (a, b) = common_amounts(subject, candidate)?;
    let larger = a.max(b);
    if larger <= Decimal::ZERO {
        return None;
    }
    let relative_gap = (a - b).abs().checked_div(larger)?;
    let score = Decimal::from(SCORE_MAX) * (Decimal::ONE - relative_gap);
    Some(clamp_score(round_whole(score)))
}

// ============================================================================
// Unit Tests
// ============================================================================
