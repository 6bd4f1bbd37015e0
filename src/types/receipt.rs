//! Ledger receipt: a point-in-time summary of the manifest ledger.
//!
//! The receipt carries a SHA-256 state root over the ledger's canonical
//! encoding, so two parties holding the same manifests can confirm they
//! agree without exchanging the records themselves.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Summary of a ledger at the moment it was issued.
///
/// ## Example
///
/// ```
/// use chrono::Utc;
/// use rust_decimal::Decimal;
/// use symbiosis_core::types::LedgerReceipt;
///
/// let receipt = LedgerReceipt::with_computed_root(3, 1, Decimal::from(150), b"[]", Utc::now());
/// assert_eq!(receipt.state_root_hex().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerReceipt {
    /// Number of manifests in the ledger
    pub manifest_count: u64,

    /// Manifests that reached Completed or Verified
    pub settled_count: u64,

    /// Sum of carbon saved across all manifests
    pub carbon_saved_kg: Decimal,

    /// SHA-256 over the canonical ledger encoding
    pub state_root: [u8; 32],

    pub issued_at: DateTime<Utc>,
}

impl LedgerReceipt {
    pub fn new(
        manifest_count: u64,
        settled_count: u64,
        carbon_saved_kg: Decimal,
        state_root: [u8; 32],
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            manifest_count,
            settled_count,
            carbon_saved_kg,
            state_root,
            issued_at,
        }
    }

    /// Create a receipt, hashing `state_data` into the state root
    pub fn with_computed_root(
        manifest_count: u64,
        settled_count: u64,
        carbon_saved_kg: Decimal,
        state_data: &[u8],
        issued_at: DateTime<Utc>,
    ) -> Self {
        let state_root = Self::compute_hash(state_data);
        Self::new(manifest_count, settled_count, carbon_saved_kg, state_root, issued_at)
    }

    /// SHA-256 of `data` as a fixed 32-byte array
    pub fn compute_hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        let result = hasher.finalize();

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }

    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }

    /// Fraction of manifests that have settled, or `None` for an empty ledger
    pub fn settlement_rate(&self) -> Option<Decimal> {
        if self.manifest_count == 0 {
            None
        } else {
            Some(Decimal::from(self.settled_count) / Decimal::from(self.manifest_count))
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
