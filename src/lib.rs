//! # Symbiosis Core
//!
//! Matching engine and manifest ledger for an industrial-symbiosis
//! marketplace, where one business's waste becomes another's raw material.
//!
//! ## Architecture
//!
//! - **Types**: Core data structures (Listing, Manifest, LedgerReceipt)
//! - **Engine**: Deterministic, explainable listing matching
//! - **Ledger**: Manifest lifecycle state machine with carbon estimation
//! - **Report**: CSV export and impact summaries over ledger output
//! - **Persistence / Config**: JSON snapshots and TOML configuration
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Identical inputs give identical scores, reasons and digests
//! 2. **No Floating Point**: All math uses `rust_decimal`
//! 3. **Injected Domain Constants**: Rates and carbon factors are configuration
//! 4. **Synchronous Execution**: Every operation runs to completion in memory
//!
//! ## Example
//!
//! ```
//! use symbiosis_core::{Ledger, ManifestStatus, MatchingEngine};
//!
//! let listings = symbiosis_core::sample::listings().unwrap();
//! let request = &listings[1]; // EcoPack needs plastic
//!
//! let engine = MatchingEngine::new();
//! let matches = engine.find_matches(request, &listings, 3).unwrap();
//! assert!(matches.iter().all(|m| m.listing_id != request.id));
//!
//! let mut ledger = Ledger::default();
//! let manifest = ledger.create("A", "B", "Cardboard", "500 kg");
//! ledger.transition(&manifest.id, "B", ManifestStatus::InTransit).unwrap();
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Listing, Manifest, LedgerReceipt
pub mod types;

/// Matching engine: deterministic listing matching
pub mod engine;

/// Manifest ledger: lifecycle state machine
pub mod ledger;

/// Reports over ledger output
pub mod report;

pub mod config;
pub mod error;
pub mod persistence;
pub mod sample;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::Config;
pub use engine::{find_matches, MatchResult, MatchingEngine, RateTable};
pub use error::{Result, SymbiosisError};
pub use ledger::{CarbonEstimator, EmissionFactorEstimator, Ledger, SharedLedger};
pub use persistence::Snapshot;
pub use report::ImpactSummary;
pub use types::{Direction, Listing, Manifest, ManifestStatus, Material, MaterialCategory, Unit};
