//! JSON snapshots of marketplace state.
//!
//! A snapshot holds the listings and the manifests under the same record
//! names the browser client stores them as (`vs_listings`,
//! `vs_manifests`), so either side can read the other's data.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::ledger::{CarbonEstimator, Ledger};
use crate::types::{Listing, Manifest};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "vs_listings", default)]
    pub listings: Vec<Listing>,

    /// Manifests in creation order
    #[serde(rename = "vs_manifests", default)]
    pub manifests: Vec<Manifest>,
}

impl Snapshot {
    /// Capture the current listings and ledger contents
    pub fn capture(listings: &[Listing], ledger: &Ledger) -> Self {
        Self {
            listings: listings.to_vec(),
            manifests: ledger.in_sequence().into_iter().cloned().collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot, rejecting listings that break their invariants
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        for listing in &snapshot.listings {
            listing.validate()?;
        }
        Ok(snapshot)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        info!(
            path = %path.display(),
            listings = self.listings.len(),
            manifests = self.manifests.len(),
            "snapshot saved"
        );
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Split into listings and a live ledger using `estimator`
    pub fn into_parts<E>(self, estimator: E) -> Result<(Vec<Listing>, Ledger)>
    where
        E: CarbonEstimator + Send + Sync + 'static,
    {
        let ledger = Ledger::restore(self.manifests, estimator)?;
        Ok((self.listings, ledger))
    }
}
