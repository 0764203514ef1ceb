// src/ledger.rs

//! Shared pool of named, countable resources.
//!
//! All mutation happens under a single mutex:
//! - [`ResourceLedger::try_acquire`] checks *every* requirement and only then
//!   decrements, inside the same critical section, so a task either takes
//!   everything it needs or nothing.
//! - [`ResourceLedger::release`] gives the amounts back.
//!
//! A name the ledger has never seen counts as zero available.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::Notify;
use tracing::{debug, trace, warn};

use crate::types::Requirements;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    available: u64,
    seed: u64,
}

/// Point-in-time view of one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLevel {
    pub name: String,
    pub available: u64,
    pub seed: u64,
}

#[derive(Debug)]
pub struct ResourceLedger {
    slots: Mutex<BTreeMap<String, Slot>>,
    released: Notify,
}

impl ResourceLedger {
    /// Create a ledger where every resource starts fully available.
    pub fn new<S: Into<String>>(resources: impl IntoIterator<Item = (S, u64)>) -> Self {
        let slots = resources
            .into_iter()
            .map(|(name, count)| {
                (
                    name.into(),
                    Slot {
                        available: count,
                        seed: count,
                    },
                )
            })
            .collect();

        Self {
            slots: Mutex::new(slots),
            released: Notify::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Slot>> {
        // Every critical section leaves the map consistent, so a panic in
        // another holder does not invalidate it.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take every requirement at once, or nothing.
    pub fn try_acquire(&self, requirements: &Requirements) -> bool {
        let mut slots = self.lock();

        let satisfied = requirements.iter().all(|req| {
            slots
                .get(&req.resource)
                .map_or(0, |slot| slot.available)
                >= req.amount
        });

        if !satisfied {
            return false;
        }

        for req in requirements.iter() {
            // Zero-amount requirements on unknown names pass the check above
            // and have nothing to take.
            if let Some(slot) = slots.get_mut(&req.resource) {
                slot.available -= req.amount;
            }
        }

        trace!(?requirements, "resources acquired");
        true
    }

    /// Return resources previously taken with [`Self::try_acquire`].
    pub fn release(&self, requirements: &Requirements) {
        {
            let mut slots = self.lock();
            for req in requirements.iter() {
                let Some(slot) = slots.get_mut(&req.resource) else {
                    continue;
                };
                let restored = slot.available.saturating_add(req.amount);
                if restored > slot.seed {
                    warn!(
                        resource = %req.resource,
                        restored,
                        seed = slot.seed,
                        "release exceeds seed count; clamping"
                    );
                }
                slot.available = restored.min(slot.seed);
            }
        }

        trace!(?requirements, "resources released");
        self.released.notify_waiters();
    }

    /// Poll until every requirement can be taken at once.
    ///
    /// Sleeps `backoff` between polls. With `wake_on_release`, a release by
    /// any task also ends the sleep early. No ordering among waiters.
    pub async fn acquire(&self, requirements: &Requirements, backoff: Duration, wake_on_release: bool) {
        let mut polls: u64 = 0;
        loop {
            // Register interest before checking, so a release between the
            // check and the sleep is not missed.
            let released = self.released.notified();

            polls += 1;
            if self.try_acquire(requirements) {
                if polls > 1 {
                    debug!(polls, "resources acquired after waiting");
                }
                return;
            }

            if wake_on_release {
                tokio::select! {
                    _ = released => {}
                    _ = tokio::time::sleep(backoff) => {}
                }
            } else {
                tokio::time::sleep(backoff).await;
            }
        }
    }

    /// Currently available count of `name` (0 if unknown).
    pub fn available(&self, name: &str) -> u64 {
        self.lock().get(name).map_or(0, |slot| slot.available)
    }

    /// Seed count of `name`, or `None` if the ledger does not know it.
    pub fn seed(&self, name: &str) -> Option<u64> {
        self.lock().get(name).map(|slot| slot.seed)
    }

    /// All resources ordered by name.
    pub fn snapshot(&self) -> Vec<ResourceLevel> {
        self.lock()
            .iter()
            .map(|(name, slot)| ResourceLevel {
                name: name.clone(),
                available: slot.available,
                seed: slot.seed,
            })
            .collect()
    }
}
