//! Listing matcher: ranks opposite-direction listings for a subject listing.
//!
//! ## Algorithm
//!
//! 1. Keep candidates on the opposite side, owned by someone else, with a
//!    positive quantity.
//! 2. Score each one (see [`scoring`](crate::engine::scoring)).
//! 3. Sort by score descending, then older `posted_at` first, then listing
//!    id, and truncate to `limit`.
//! 4. Attach a deterministic reason and a benefit estimate from the
//!    caller's [`RateTable`].
//!
//! The matcher holds no state between calls and performs no I/O.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::engine::rates::RateTable;
use crate::engine::scoring::{Assessment, ScoreBreakdown};
use crate::error::{Result, SymbiosisError};
use crate::types::quantity::{round_cents, saturating_mul};
use crate::types::Listing;

/// Number of matches returned when the caller does not say otherwise
pub const DEFAULT_LIMIT: usize = 3;

/// One ranked candidate for a subject listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// Id of the matched candidate listing
    pub listing_id: String,

    /// Weighted compatibility in 0..=100
    pub score: u8,

    /// Explanation built from the sub-scores
    pub reason: String,

    /// `candidate.quantity * rate[candidate.material]`
    pub potential_benefit: Decimal,

    pub breakdown: ScoreBreakdown,
}

/// Deterministic matching engine.
///
/// ## Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
/// use symbiosis_core::engine::MatchingEngine;
/// use symbiosis_core::types::{Direction, Listing, Material, Unit};
///
/// let posted = Utc.with_ymd_and_hms(2023, 10, 26, 0, 0, 0).unwrap();
/// let request = Listing::new("r1", "buyer", Direction::Request, Material::parse("Plastic Packaging"),
///     Decimal::from(500), Unit::Kg, "Gurugram, Haryana", posted).unwrap();
/// let offer = Listing::new("o1", "seller", Direction::Offer, Material::parse("Plastic Packaging"),
///     Decimal::from(500), Unit::Kg, "Gurugram, Haryana", posted).unwrap();
///
/// let engine = MatchingEngine::new();
/// let matches = engine.find_matches(&request, &[offer], 3).unwrap();
///
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches[0].score, 100);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    rates: RateTable,
}

impl MatchingEngine {
    /// Engine using the default reference rates
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rates(rates: RateTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Rank `candidates` for `subject`, returning at most `limit` results
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `subject.quantity <= 0` or `limit < 1`.
    pub fn find_matches(
        &self,
        subject: &Listing,
        candidates: &[Listing],
        limit: usize,
    ) -> Result<Vec<MatchResult>> {
        find_matches(subject, candidates, limit, &self.rates)
    }

    /// [`find_matches`](Self::find_matches) with [`DEFAULT_LIMIT`]
    pub fn find_top_matches(&self, subject: &Listing, candidates: &[Listing]) -> Result<Vec<MatchResult>> {
        self.find_matches(subject, candidates, DEFAULT_LIMIT)
    }
}

/// Whether `candidate` may be matched against `subject` at all
pub fn is_eligible(subject: &Listing, candidate: &Listing) -> bool {
    candidate.direction == subject.direction.opposite()
        && candidate.owner_id != subject.owner_id
        && candidate.quantity > Decimal::ZERO
}

/// Higher score first, then older listing, then listing id
fn rank(a: &(&Listing, Assessment), b: &(&Listing, Assessment)) -> Ordering {
    b.1.score()
        .cmp(&a.1.score())
        .then_with(|| a.0.posted_at.cmp(&b.0.posted_at))
        .then_with(|| a.0.id.cmp(&b.0.id))
}

/// Free-function form of [`MatchingEngine::find_matches`]
pub fn find_matches(
    subject: &Listing,
    candidates: &[Listing],
    limit: usize,
    rates: &RateTable,
) -> Result<Vec<MatchResult>> {
    if subject.quantity <= Decimal::ZERO {
        return Err(SymbiosisError::InvalidInput(format!(
            "subject listing {} must have a positive quantity, got {}",
            subject.id, subject.quantity
        )));
    }
    if limit < 1 {
        return Err(SymbiosisError::InvalidInput("match limit must be at least 1".to_string()));
    }

    let mut scored: Vec<(&Listing, Assessment)> = candidates
        .iter()
        .filter(|candidate| is_eligible(subject, candidate))
        .map(|candidate| (candidate, Assessment::of(subject, candidate)))
        .collect();

    debug!(
        subject = %subject.id,
        pool = candidates.len(),
        eligible = scored.len(),
        limit,
        "scoring match candidates"
    );

    scored.sort_by(rank);
    scored.truncate(limit);

    let results = scored
        .into_iter()
        .map(|(candidate, assessment)| MatchResult {
            listing_id: candidate.id.clone(),
            score: assessment.score(),
            reason: assessment.reason(subject, candidate),
            potential_benefit: round_cents(saturating_mul(
                candidate.quantity,
                rates.rate_for(&candidate.material),
            )),
            breakdown: assessment.breakdown,
        })
        .collect();

    Ok(results)
}

// ============================================================================
// Unit Tests
// ============================================================================
