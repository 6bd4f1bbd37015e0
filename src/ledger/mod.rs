//! Manifest ledger module.
//!
//! ## Components
//!
//! - [`Ledger`]: Slab-backed manifest collection enforcing the lifecycle
//! - [`CarbonEstimator`]: Injected carbon-saved estimation
//! - [`SharedLedger`]: Mutex-guarded handle for multi-threaded callers
//!
//! ## State Machine
//!
//! | From | To | Who |
//! |------|----|-----|
//! | Pending | InTransit | source or destination |
//! | InTransit | Completed | destination only |
//! | Completed | Verified | destination only |
//!
//! Anything else is an `InvalidTransition`.

pub mod book;
pub mod carbon;
pub mod shared;

pub use book::Ledger;
pub use carbon::{CarbonEstimator, EmissionFactorEstimator};
pub use shared::SharedLedger;
