//! Matching engine module.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Same input always produces same output
//! 2. **Fixed-Point Math**: Scores and benefits are `Decimal`, never `f64`
//! 3. **Pure**: No I/O, no clock, no randomness; safe to call from any thread
//! 4. **Explainable**: Every score carries its breakdown and a reason
//!
//! ## Matching Rules
//!
//! - **Offers** match against requests, and vice versa
//! - A business never matches its own listing
//! - Results are ranked by score, then by posting age (older first)
//!
//! ## Example
//!
//! ```
//! use chrono::Utc;
//! use rust_decimal::Decimal;
//! use symbiosis_core::engine::{MatchingEngine, RateTable};
//! use symbiosis_core::types::{Direction, Listing, Material, MaterialCategory, Unit};
//!
//! let now = Utc::now();
//! let offer = Listing::new("l1", "u2", Direction::Offer, Material::parse("Paper/Cotton Scrap"),
//!     Decimal::from(500), Unit::Kg, "Panipat, Haryana", now).unwrap();
//! let request = Listing::new("l9", "u7", Direction::Request, Material::parse("Wood/Pallets"),
//!     Decimal::from(400), Unit::Kg, "Sonipat, Haryana", now).unwrap();
//!
//! let rates = RateTable::new(Decimal::from(15)).with_rate(MaterialCategory::Textile, Decimal::from(20));
//! let engine = MatchingEngine::with_rates(rates);
//! let matches = engine.find_matches(&request, &[offer], 3).unwrap();
//!
//! assert_eq!(matches[0].potential_benefit, Decimal::from(10_000));
//! assert!(matches[0].reason.starts_with("Related biological material"));
//! ```

pub mod matcher;
pub mod rates;
pub mod scoring;

pub use matcher::{find_matches, MatchResult, MatchingEngine, DEFAULT_LIMIT};
pub use rates::RateTable;
pub use scoring::ScoreBreakdown;
