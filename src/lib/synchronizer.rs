//! Write-through synchronization of the classroom reservation board.
//!
//! The synchronizer owns the snapshot of reservations shown to the user. It only
//! changes the snapshot after the remote store has accepted the change, so a failed
//! write never leaves a room looking taken or free when the store disagrees.
//!
//! Everything runs on one task; the cells below are never borrowed across an `.await`.
use std::{
    cell::{Cell, RefCell},
    collections::HashSet,
};

use log::{debug, error, info, warn};

use crate::{
    error::{StoreError, SyncError},
    models::{
        identity_model::Identity,
        reservation_model::{Reservation, ReservationRecord, ReservationState},
    },
    session::Session,
    store::ReservationStore,
};

pub type Snapshot = Vec<Reservation>;

/// Validates a freshly fetched collection: every record consistent, each classroom once.
pub fn build_snapshot(records: Vec<ReservationRecord>) -> Result<Snapshot, StoreError> {
    if records.is_empty() {
        return Err(StoreError::NoData);
    }
    let mut seen = HashSet::new();
    let mut snapshot = Vec::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.classroom_name.clone()) {
            return Err(StoreError::DuplicateClassroom(record.classroom_name));
        }
        let key = record.classroom_name.clone();
        let reservation = Reservation::try_from(record)
            .map_err(|source| StoreError::InvalidRecord { key, source })?;
        snapshot.push(reservation);
    }
    Ok(snapshot)
}

/// Marks a classroom as having a write in flight until dropped.
struct PendingGuard<'a> {
    pending: &'a RefCell<HashSet<String>>,
    classroom_name: String,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending.borrow_mut().remove(&self.classroom_name);
    }
}

pub struct ReservationSynchronizer<S> {
    store: S,
    snapshot: RefCell<Snapshot>,
    pending: RefCell<HashSet<String>>,
    /// Bumped by `detach`; answers started under an older generation are dropped.
    generation: Cell<u64>,
    last_error: RefCell<Option<String>>,
}

impl<S: ReservationStore> ReservationSynchronizer<S> {
    /// A mounted synchronizer with an empty snapshot.
    pub fn new(store: S) -> Self {
        ReservationSynchronizer {
            store,
            snapshot: RefCell::new(Vec::new()),
            pending: RefCell::new(HashSet::new()),
            generation: Cell::new(0),
            last_error: RefCell::new(None),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    /// User-facing message of the last failed load or write, cleared by the next success.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.borrow().clone()
    }

    pub fn is_pending(&self, classroom_name: &str) -> bool {
        self.pending.borrow().contains(classroom_name)
    }

    pub fn state_of(&self, classroom_name: &str, identity: &Identity) -> Option<ReservationState> {
        self.snapshot
            .borrow()
            .iter()
            .find(|reservation| reservation.classroom_name() == classroom_name)
            .map(|reservation| reservation.state_for(identity.id()))
    }

    /// Drops the snapshot. Answers to requests already in flight will be discarded.
    pub fn detach(&self) {
        self.generation.set(self.generation.get() + 1);
        self.snapshot.borrow_mut().clear();
        self.last_error.replace(None);
        info!("Reservation board detached");
    }

    /// Replaces the snapshot with the store's current contents.
    /// On failure the previous snapshot is kept.
    pub async fn load_snapshot(&self) -> Result<Snapshot, SyncError> {
        let generation = self.generation.get();
        let loaded = match self.store.fetch_all().await {
            Ok(records) => build_snapshot(records),
            Err(e) => Err(e),
        };
        if self.generation.get() != generation {
            debug!("Discarding reservations loaded for a detached board");
            return Err(SyncError::Detached);
        }
        match loaded {
            Ok(snapshot) => {
                info!("Loaded {} reservations", snapshot.len());
                self.snapshot.replace(snapshot.clone());
                self.last_error.replace(None);
                Ok(snapshot)
            }
            Err(e) => {
                warn!("Failed to load reservations: {}", e);
                Err(self.fail(SyncError::LoadFailed(e)))
            }
        }
    }

    /// Reserves a free classroom for the logged-in identity, or cancels its own reservation.
    pub async fn toggle(
        &self,
        session: &Session<'_>,
        classroom_name: &str,
    ) -> Result<Snapshot, SyncError> {
        let identity = session.identity().ok_or(SyncError::NotLoggedIn)?;
        let owner_id = identity.id();

        let current = self
            .snapshot
            .borrow()
            .iter()
            .find(|reservation| reservation.classroom_name() == classroom_name)
            .cloned();
        let Some(current) = current else {
            error!(
                "Toggle requested for {}, which is not on the board",
                classroom_name
            );
            return Err(SyncError::UnknownClassroom(classroom_name.to_owned()));
        };
        let Some(next) = current.toggled_for(owner_id) else {
            warn!(
                "{} tried to toggle {}, held by someone else",
                owner_id, classroom_name
            );
            return Err(SyncError::NotOwner {
                classroom: classroom_name.to_owned(),
            });
        };

        let _guard = self.begin_request(classroom_name)?;
        let generation = self.generation.get();
        let written = self.store.update(&next.to_record()).await;
        if self.generation.get() != generation {
            debug!("Discarding store answer for {} on a detached board", classroom_name);
            return Err(SyncError::Detached);
        }
        if let Err(e) = written {
            warn!("Store rejected the change to {}: {}", classroom_name, e);
            let failure = if next.is_reserved() {
                SyncError::ReserveFailed(e)
            } else {
                SyncError::CancelFailed(e)
            };
            return Err(self.fail(failure));
        }

        info!(
            "{} {} {}",
            owner_id,
            if next.is_reserved() { "reserved" } else { "released" },
            classroom_name
        );
        {
            let mut snapshot = self.snapshot.borrow_mut();
            match snapshot
                .iter_mut()
                .find(|reservation| reservation.classroom_name() == classroom_name)
            {
                Some(slot) => *slot = next,
                None => warn!(
                    "{} left the board while its write was in flight",
                    classroom_name
                ),
            }
        }
        self.last_error.replace(None);
        Ok(self.snapshot())
    }

    fn begin_request(&self, classroom_name: &str) -> Result<PendingGuard<'_>, SyncError> {
        if !self.pending.borrow_mut().insert(classroom_name.to_owned()) {
            debug!("Toggle of {} ignored, a write is in flight", classroom_name);
            return Err(SyncError::Pending(classroom_name.to_owned()));
        }
        Ok(PendingGuard {
            pending: &self.pending,
            classroom_name: classroom_name.to_owned(),
        })
    }

    fn fail(&self, failure: SyncError) -> SyncError {
        self.last_error.replace(Some(failure.to_string()));
        failure
    }
}

#[cfg(test)]
#[path = "tests/synchronizer.rs"]
mod tests;
