//! Thread-safe handle to a [`Ledger`].
//!
//! Every operation takes the ledger lock for its whole duration, so two
//! concurrent `transition` calls on the same manifest are serialized: one
//! wins, and the other observes the post-transition state. A racing call
//! that targets the state the winner already reached fails with
//! `InvalidTransition`; transitions are not idempotent.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::ledger::Ledger;
use crate::types::{Manifest, ManifestStatus};

#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// A panic in another holder leaves the ledger consistent (every
    /// mutation happens after validation), so a poisoned lock is recovered.
    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn create(
        &self,
        source_party: &str,
        destination_party: &str,
        material: &str,
        quantity_label: &str,
    ) -> Manifest {
        self.lock().create(source_party, destination_party, material, quantity_label)
    }

    pub fn create_at(
        &self,
        source_party: &str,
        destination_party: &str,
        material: &str,
        quantity_label: &str,
        date: DateTime<Utc>,
    ) -> Manifest {
        self.lock()
            .create_at(source_party, destination_party, material, quantity_label, date)
    }

    pub fn transition(
        &self,
        manifest_id: &str,
        acting_party: &str,
        target: ManifestStatus,
    ) -> Result<Manifest> {
        self.lock().transition(manifest_id, acting_party, target)
    }

    pub fn get(&self, manifest_id: &str) -> Option<Manifest> {
        self.lock().get(manifest_id).cloned()
    }

    pub fn list(&self, filter_by_party: Option<&str>) -> Vec<Manifest> {
        self.lock().list(filter_by_party)
    }

    /// Run a read-only closure against the ledger under the lock
    pub fn read<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        f(&self.lock())
    }
}

impl From<Ledger> for SharedLedger {
    fn from(ledger: Ledger) -> Self {
        Self::new(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SymbiosisError;
    use std::thread;

    #[test]
    fn test_racing_transitions_have_one_winner() {
        for _ in 0..20 {
            let shared = SharedLedger::new(Ledger::default());
            let id = shared.create("A", "B", "Cardboard", "500 kg").id;
            shared.transition(&id, "A", ManifestStatus::InTransit).unwrap();

            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let shared = shared.clone();
                    let id = id.clone();
                    thread::spawn(move || shared.transition(&id, "B", ManifestStatus::Completed))
                })
                .collect();

            let results: Vec<Result<Manifest>> =
                handles.into_iter().map(|h| h.join().unwrap()).collect();

            let winners = results.iter().filter(|r| r.is_ok()).count();
            assert_eq!(winners, 1);
            for result in results.iter().filter_map(|r| r.as_ref().err()) {
                assert!(matches!(
                    result,
                    SymbiosisError::InvalidTransition { from: ManifestStatus::Completed, .. }
                ));
            }
            assert_eq!(shared.get(&id).unwrap().status, ManifestStatus::Completed);
        }
    }

    #[test]
    fn test_concurrent_creates_get_unique_ids() {
        let shared = SharedLedger::new(Ledger::default());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    (0..25)
                        .map(|i| shared.create(&format!("s{t}"), "d", "Glass Cullet", &format!("{i} kg")).id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<String> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 100);
        assert_eq!(shared.read(|ledger| ledger.len()), 100);
    }
}
