//! Core data types for the symbiosis marketplace.
//!
//! All numeric values are [`rust_decimal::Decimal`]; nothing in the core
//! touches floating point.
//!
//! ## Types
//!
//! - [`Listing`]: A posted material offer or request
//! - [`Direction`]: Offer or Request
//! - [`Material`] / [`MaterialCategory`]: What is being exchanged
//! - [`Unit`]: What the quantity is measured in
//! - [`Manifest`] / [`ManifestStatus`]: A material exchange and its lifecycle
//! - [`LedgerReceipt`]: Point-in-time ledger summary with a state root

mod listing;
mod manifest;
mod material;
mod receipt;
pub mod quantity;

pub use listing::{Direction, Listing};
pub use manifest::{Manifest, ManifestStatus};
pub use material::{Material, MaterialCategory, MaterialGroup, Unit};
pub use receipt::LedgerReceipt;
