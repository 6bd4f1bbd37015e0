//! Manifest type: the durable record of one material exchange.
//!
//! ## Lifecycle
//!
//! ```text
//! Pending -> InTransit -> Completed -> Verified
//! ```
//!
//! Each step moves exactly one state forward. `Verified` is terminal;
//! `Completed` is terminal unless the receiver goes on to verify it.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// ManifestStatus enum
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ManifestStatus {
    /// Exchange initiated, nothing shipped yet
    #[default]
    Pending,
    /// Material has left the source
    InTransit,
    /// Receiver confirmed receipt
    Completed,
    /// Receiver verified the exchange
    Verified,
}

impl ManifestStatus {
    /// The single state this one may advance to, if any
    pub fn next(self) -> Option<Self> {
        match self {
            ManifestStatus::Pending => Some(ManifestStatus::InTransit),
            ManifestStatus::InTransit => Some(ManifestStatus::Completed),
            ManifestStatus::Completed => Some(ManifestStatus::Verified),
            ManifestStatus::Verified => None,
        }
    }

    /// `true` if `target` is the immediate forward step from `self`
    pub fn can_advance_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }

    /// Entering this state is reserved for the receiving party
    pub fn requires_receiver(self) -> bool {
        matches!(self, ManifestStatus::Completed | ManifestStatus::Verified)
    }

    /// The exchange has been delivered (completed or verified)
    pub fn is_settled(self) -> bool {
        matches!(self, ManifestStatus::Completed | ManifestStatus::Verified)
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Human-readable label, as shown in manifests and exports
    pub fn label(self) -> &'static str {
        match self {
            ManifestStatus::Pending => "Pending",
            ManifestStatus::InTransit => "In Transit",
            ManifestStatus::Completed => "Completed",
            ManifestStatus::Verified => "Verified",
        }
    }
}

impl fmt::Display for ManifestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Manifest struct
// ============================================================================

/// A record of one material exchange between two businesses.
///
/// Manifests are created and mutated only through the
/// [`Ledger`](crate::ledger::Ledger); fields are public for reading and
/// for snapshot restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Unique identifier, `"m-<sequence>"`
    pub id: String,

    /// Ledger sequence number; orders manifests created at the same instant
    pub sequence: u64,

    /// Creation timestamp
    pub date: DateTime<Utc>,

    pub material: String,

    /// Descriptive quantity, e.g. `"500 kg"`
    pub quantity_label: String,

    /// Business shipping the material
    pub source_party: String,

    /// Business receiving the material
    pub destination_party: String,

    pub status: ManifestStatus,

    /// Estimated kg CO2 avoided; zero until the exchange settles
    pub carbon_saved_kg: Decimal,
}

impl Manifest {
    /// Format the id for a ledger sequence number
    pub fn id_for(sequence: u64) -> String {
        format!("m-{sequence}")
    }

    /// `true` if `party` is the source or the destination
    pub fn involves(&self, party: &str) -> bool {
        self.source_party == party || self.destination_party == party
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
