use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use super::store::DraftSession;

/// Errors from the durable session slot.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session slot is corrupt: {0}")]
    Corrupt(String),
}

/// The durable client-side slot holding one serialized session.
///
/// Synchronous on purpose: the store never awaits. Backends decide where the
/// slot lives (a JSON file, an in-memory cell for tests, ...); the contract
/// is only "read prior state at startup, write current state after each
/// mutation".
pub trait SessionStorage {
    /// Reads the slot. `Ok(None)` means no prior session exists.
    fn load(&self) -> Result<Option<DraftSession>, StorageError>;

    /// Overwrites the slot with the given session.
    fn save(
        &self,
        session: &DraftSession,
    ) -> Result<(), StorageError>;

    /// Empties the slot.
    fn clear(&self) -> Result<(), StorageError>;
}

impl<S: SessionStorage + ?Sized> SessionStorage for &S {
    fn load(&self) -> Result<Option<DraftSession>, StorageError> {
        (**self).load()
    }

    fn save(
        &self,
        session: &DraftSession,
    ) -> Result<(), StorageError> {
        (**self).save(session)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}

/// In-memory slot, used by tests and anywhere durability is not wanted.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<DraftSession>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds the slot, as if a prior session had been saved.
    pub fn with_session(session: DraftSession) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }

    /// A poisoned lock means a writer panicked mid-save; the slot contents
    /// are suspect, so surface that as a corrupt slot rather than panicking.
    fn lock(&self) -> Result<MutexGuard<'_, Option<DraftSession>>, StorageError> {
        self.slot
            .lock()
            .map_err(|_| StorageError::Corrupt("session slot lock poisoned".to_string()))
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<Option<DraftSession>, StorageError> {
        Ok(self.lock()?.clone())
    }

    fn save(
        &self,
        session: &DraftSession,
    ) -> Result<(), StorageError> {
        *self.lock()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.lock()? = None;
        Ok(())
    }
}

/// A [`DraftSession`] bound to a storage backend: rehydrated at open, written
/// back after every mutation.
pub struct PersistentSession<S: SessionStorage> {
    session: DraftSession,
    storage: S,
}

impl<S: SessionStorage> PersistentSession<S> {
    /// Opens the session from the slot, or starts fresh when the slot is
    /// empty. A corrupt slot is an error; callers decide whether to discard
    /// it.
    pub fn open(storage: S) -> Result<Self, StorageError> {
        let session = storage.load()?.unwrap_or_default();
        Ok(Self { session, storage })
    }

    pub fn session(&self) -> &DraftSession {
        &self.session
    }

    /// Applies a mutation and writes the slot afterwards. The mutation itself
    /// cannot fail; only the write can.
    pub fn update<R>(
        &mut self,
        mutate: impl FnOnce(&mut DraftSession) -> R,
    ) -> Result<R, StorageError> {
        let out = mutate(&mut self.session);
        self.storage.save(&self.session)?;
        Ok(out)
    }

    /// Resets the session and empties the slot.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.session.reset();
        self.storage.clear()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::model::WorkItemEntry;

    use super::*;

    fn demolition() -> WorkItemEntry {
        WorkItemEntry::new("Demolition", "m2", dec!(8), dec!(18), vec![])
    }

    #[test]
    fn open_starts_fresh_when_slot_is_empty() {
        let persistent = PersistentSession::open(MemoryStorage::new()).unwrap();

        assert_eq!(persistent.session(), &DraftSession::new());
    }

    #[test]
    fn open_rehydrates_the_prior_session() {
        let mut prior = DraftSession::new();
        prior.add_work_item(demolition());
        prior.set_current_step(2);

        let persistent =
            PersistentSession::open(MemoryStorage::with_session(prior.clone())).unwrap();

        assert_eq!(persistent.session(), &prior);
    }

    #[test]
    fn update_writes_the_slot_after_each_mutation() {
        let mut persistent = PersistentSession::open(MemoryStorage::new()).unwrap();

        persistent
            .update(|session| session.add_work_item(demolition()))
            .unwrap();

        // A second handle over the same slot sees the mutation.
        let stored = persistent.storage.load().unwrap().unwrap();
        assert_eq!(stored.draft().items.len(), 1);
    }

    #[test]
    fn clear_resets_session_and_empties_slot() {
        let mut persistent = PersistentSession::open(MemoryStorage::new()).unwrap();
        persistent
            .update(|session| session.add_work_item(demolition()))
            .unwrap();

        persistent.clear().unwrap();

        assert_eq!(persistent.session(), &DraftSession::new());
        assert_eq!(persistent.storage.load().unwrap(), None);
    }

    #[test]
    fn poisoned_slot_surfaces_as_a_corrupt_error() {
        let storage = MemoryStorage::new();

        let panicked = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = storage.slot.lock().unwrap();
            panic!("writer died mid-save");
        }));
        assert!(panicked.is_err());

        assert!(matches!(storage.load(), Err(StorageError::Corrupt(_))));
        assert!(matches!(
            storage.save(&DraftSession::new()),
            Err(StorageError::Corrupt(_))
        ));
    }
}
