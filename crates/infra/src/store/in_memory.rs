use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use phonebook_core::{
    Entry, EntryId, Field, IdentifierShape, NewEntry, PhonebookError, PhonebookResult,
    find_duplicate,
};

use super::EntryStore;

#[derive(Debug)]
struct State {
    last_id: u64,
    // Keyed by sequence number, so iteration order is insertion order.
    entries: BTreeMap<u64, Entry>,
}

/// Volatile entry store for tests/dev. Lost on restart.
///
/// Ids come from a monotonic counter starting at 1 and are never reused,
/// even after the entry holding them is deleted.
#[derive(Debug)]
pub struct InMemoryEntryStore {
    inner: RwLock<State>,
}

impl InMemoryEntryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(State {
                last_id: 0,
                entries: BTreeMap::new(),
            }),
        }
    }

    fn read(&self) -> PhonebookResult<RwLockReadGuard<'_, State>> {
        self.inner
            .read()
            .map_err(|_| PhonebookError::unavailable("in-memory store lock poisoned"))
    }

    fn write(&self) -> PhonebookResult<RwLockWriteGuard<'_, State>> {
        self.inner
            .write()
            .map_err(|_| PhonebookError::unavailable("in-memory store lock poisoned"))
    }
}

impl Default for InMemoryEntryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    fn identifier_shape(&self) -> IdentifierShape {
        IdentifierShape::Sequential
    }

    async fn list(&self) -> PhonebookResult<Vec<Entry>> {
        Ok(self.read()?.entries.values().cloned().collect())
    }

    async fn get(&self, id: &EntryId) -> PhonebookResult<Option<Entry>> {
        let Some(seq) = id.as_sequence() else {
            return Ok(None);
        };
        Ok(self.read()?.entries.get(&seq).cloned())
    }

    async fn insert(&self, entry: NewEntry) -> PhonebookResult<Entry> {
        let mut state = self.write()?;
        let seq = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| PhonebookError::unavailable("in-memory id space exhausted"))?;
        state.last_id = seq;

        let stored = Entry::from_parts(EntryId::Sequence(seq), entry);
        state.entries.insert(seq, stored.clone());
        Ok(stored)
    }

    async fn replace(&self, id: &EntryId, entry: NewEntry) -> PhonebookResult<Option<Entry>> {
        let Some(seq) = id.as_sequence() else {
            return Ok(None);
        };
        let mut state = self.write()?;
        match state.entries.get_mut(&seq) {
            Some(existing) => {
                *existing = Entry::from_parts(*id, entry);
                Ok(Some(existing.clone()))
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, id: &EntryId) -> PhonebookResult<bool> {
        let Some(seq) = id.as_sequence() else {
            return Ok(false);
        };
        Ok(self.write()?.entries.remove(&seq).is_some())
    }

    async fn count(&self) -> PhonebookResult<u64> {
        Ok(self.read()?.entries.len() as u64)
    }

    async fn find_duplicate(
        &self,
        entry: &NewEntry,
        exclude: Option<&EntryId>,
    ) -> PhonebookResult<Option<Field>> {
        let state = self.read()?;
        Ok(find_duplicate(entry, state.entries.values(), exclude))
    }
}
