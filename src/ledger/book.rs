//! Manifest ledger: storage and lifecycle enforcement for manifests.
//!
//! ## Architecture
//!
//! - **Slab**: Pre-allocated manifest storage, O(1) access by key
//! - **HashMap**: Manifest id to slab key mapping, O(1) lookup by id
//! - **Sequence counter**: Fresh ids (`m-1`, `m-2`, ...) and a stable
//!   creation order for manifests sharing a timestamp
//!
//! Manifests are historical records and are never removed.
//!
//! ## Transition Rules
//!
//! Checked in this order:
//!
//! 1. The manifest exists, else `NotFound`
//! 2. The target is the single next state, else `InvalidTransition`
//! 3. Moving to `InTransit` requires a party to the manifest; moving to
//!    `Completed` or `Verified` requires the destination party, else
//!    `Unauthorized`
//!
//! ## Example
//!
//! ```
//! use symbiosis_core::ledger::Ledger;
//! use symbiosis_core::types::ManifestStatus;
//!
//! let mut ledger = Ledger::default();
//! let manifest = ledger.create("A", "B", "Cardboard", "500 kg");
//!
//! ledger.transition(&manifest.id, "B", ManifestStatus::InTransit).unwrap();
//! let done = ledger.transition(&manifest.id, "B", ManifestStatus::Completed).unwrap();
//!
//! assert_eq!(done.status, ManifestStatus::Completed);
//! assert!(done.carbon_saved_kg > rust_decimal::Decimal::ZERO);
//! ```

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use slab::Slab;
use tracing::{debug, info};

use crate::error::{Result, SymbiosisError};
use crate::ledger::carbon::{CarbonEstimator, EmissionFactorEstimator};
use crate::types::quantity::saturating_sum;
use crate::types::{Direction, LedgerReceipt, Listing, Manifest, ManifestStatus};

type BoxedEstimator = Box<dyn CarbonEstimator + Send + Sync>;

/// In-memory collection of manifests, owned by whoever instantiates it.
pub struct Ledger {
    /// Manifest storage
    manifests: Slab<Manifest>,

    /// Manifest id to slab key
    index: HashMap<String, usize>,

    /// Sequence number for the next created manifest
    next_sequence: u64,

    /// Computes carbon saved when a manifest settles
    estimator: BoxedEstimator,
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("manifests", &self.manifests.len())
            .field("next_sequence", &self.next_sequence)
            .finish_non_exhaustive()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(EmissionFactorEstimator::default())
    }
}

impl Ledger {
    /// Create an empty ledger with the given carbon estimator
    pub fn new<E>(estimator: E) -> Self
    where
        E: CarbonEstimator + Send + Sync + 'static,
    {
        Self::with_capacity(0, estimator)
    }

    /// Create an empty ledger with room for `capacity` manifests
    pub fn with_capacity<E>(capacity: usize, estimator: E) -> Self
    where
        E: CarbonEstimator + Send + Sync + 'static,
    {
        Self {
            manifests: Slab::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            next_sequence: 1,
            estimator: Box::new(estimator),
        }
    }

    /// Rebuild a ledger from previously persisted manifests
    ///
    /// New manifests continue numbering after the highest restored sequence.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if two manifests share an id, or if an id is not the
    /// one its sequence number produces (`m-<sequence>`).
    pub fn restore<E>(manifests: Vec<Manifest>, estimator: E) -> Result<Self>
    where
        E: CarbonEstimator + Send + Sync + 'static,
    {
        let mut ledger = Self::with_capacity(manifests.len(), estimator);
        for manifest in manifests {
            let expected = Manifest::id_for(manifest.sequence);
            if manifest.id != expected {
                return Err(SymbiosisError::InvalidInput(format!(
                    "manifest id {} does not match its sequence {} (expected {expected})",
                    manifest.id, manifest.sequence
                )));
            }
            if ledger.index.contains_key(&manifest.id) {
                return Err(SymbiosisError::InvalidInput(format!(
                    "duplicate manifest id {} in snapshot",
                    manifest.id
                )));
            }
            ledger.next_sequence = ledger.next_sequence.max(manifest.sequence.saturating_add(1));
            ledger.insert(manifest);
        }
        info!(manifests = ledger.len(), "restored manifest ledger");
        Ok(ledger)
    }

    fn insert(&mut self, manifest: Manifest) {
        let id = manifest.id.clone();
        let key = self.manifests.insert(manifest);
        self.index.insert(id, key);
    }

    // ========================================================================
    // Size
    // ========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.manifests.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.manifests.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// Record a new exchange, stamped with the current time
    pub fn create(
        &mut self,
        source_party: &str,
        destination_party: &str,
        material: &str,
        quantity_label: &str,
    ) -> Manifest {
        self.create_at(source_party, destination_party, material, quantity_label, Utc::now())
    }

    /// Record a new exchange with an explicit creation timestamp
    pub fn create_at(
        &mut self,
        source_party: &str,
        destination_party: &str,
        material: &str,
        quantity_label: &str,
        date: DateTime<Utc>,
    ) -> Manifest {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let manifest = Manifest {
            id: Manifest::id_for(sequence),
            sequence,
            date,
            material: material.to_string(),
            quantity_label: quantity_label.to_string(),
            source_party: source_party.to_string(),
            destination_party: destination_party.to_string(),
            status: ManifestStatus::Pending,
            carbon_saved_kg: Decimal::ZERO,
        };

        info!(
            manifest = %manifest.id,
            source = source_party,
            destination = destination_party,
            material,
            "manifest created"
        );
        self.insert(manifest.clone());
        manifest
    }

    /// Open a manifest for `acting_party` acting on `listing`
    ///
    /// Acting on an offer makes the actor the receiver; acting on a request
    /// makes the actor the supplier.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the actor owns the listing.
    pub fn connect(&mut self, listing: &Listing, acting_party: &str) -> Result<Manifest> {
        if listing.owner_id == acting_party {
            return Err(SymbiosisError::InvalidInput(format!(
                "party {acting_party} cannot connect to its own listing {}",
                listing.id
            )));
        }
        let (source, destination) = match listing.direction {
            Direction::Offer => (listing.owner_id.as_str(), acting_party),
            Direction::Request => (acting_party, listing.owner_id.as_str()),
        };
        Ok(self.create(source, destination, listing.material.label(), &listing.quantity_label()))
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Advance a manifest one step through its lifecycle
    ///
    /// On entry into `Completed` or `Verified` the carbon estimate is
    /// recomputed from the manifest's material and quantity label.
    pub fn transition(
        &mut self,
        manifest_id: &str,
        acting_party: &str,
        target: ManifestStatus,
    ) -> Result<Manifest> {
        let key = *self
            .index
            .get(manifest_id)
            .ok_or_else(|| SymbiosisError::NotFound(format!("manifest {manifest_id}")))?;
        let manifest = self
            .manifests
            .get_mut(key)
            .ok_or_else(|| SymbiosisError::NotFound(format!("manifest {manifest_id}")))?;

        let from = manifest.status;
        if !from.can_advance_to(target) {
            return Err(SymbiosisError::InvalidTransition {
                manifest_id: manifest_id.to_string(),
                from,
                to: target,
            });
        }

        let permitted = if target.requires_receiver() {
            manifest.destination_party == acting_party
        } else {
            manifest.involves(acting_party)
        };
        if !permitted {
            return Err(SymbiosisError::Unauthorized {
                actor: acting_party.to_string(),
                manifest_id: manifest_id.to_string(),
                target,
            });
        }

        manifest.status = target;
        if target.is_settled() {
            manifest.carbon_saved_kg = self
                .estimator
                .estimate(&manifest.material, &manifest.quantity_label);
        }

        debug!(
            manifest = manifest_id,
            actor = acting_party,
            %from,
            to = %target,
            carbon_saved_kg = %manifest.carbon_saved_kg,
            "manifest transitioned"
        );
        Ok(manifest.clone())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn get(&self, manifest_id: &str) -> Option<&Manifest> {
        let key = *self.index.get(manifest_id)?;
        self.manifests.get(key)
    }

    /// Manifests, most recent first, optionally only those involving `party`
    pub fn list(&self, filter_by_party: Option<&str>) -> Vec<Manifest> {
        let mut manifests: Vec<Manifest> = self
            .manifests
            .iter()
            .map(|(_, manifest)| manifest)
            .filter(|manifest| filter_by_party.map_or(true, |party| manifest.involves(party)))
            .cloned()
            .collect();
        manifests.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.sequence.cmp(&a.sequence)));
        manifests
    }

    /// All manifests in creation order, the canonical order for hashing
    pub fn in_sequence(&self) -> Vec<&Manifest> {
        let mut manifests: Vec<&Manifest> = self.manifests.iter().map(|(_, m)| m).collect();
        manifests.sort_by_key(|manifest| manifest.sequence);
        manifests
    }

    /// Summary with a SHA-256 state root over the canonical JSON encoding
    pub fn receipt(&self, issued_at: DateTime<Utc>) -> Result<LedgerReceipt> {
        let manifests = self.in_sequence();
        let encoded = serde_json::to_vec(&manifests)?;

        let settled = manifests.iter().filter(|m| m.status.is_settled()).count();
        let carbon = saturating_sum(manifests.iter().map(|m| m.carbon_saved_kg));

        Ok(LedgerReceipt::with_computed_root(
            manifests.len() as u64,
            settled as u64,
            carbon,
            &encoded,
            issued_at,
        ))
    }

    /// Hex SHA-256 fingerprint of the ledger contents
    pub fn digest(&self) -> Result<String> {
        Ok(self.receipt(Utc::now())?.state_root_hex())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
