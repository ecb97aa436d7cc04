//! Entry storage boundary.
//!
//! `EntryStore` is the persistence seam: it stores already-validated entries
//! and knows nothing about payload validation or the duplicate policy. Those
//! live in [`crate::phonebook::Phonebook`], which wraps any backend.
//!
//! ## Error contract
//!
//! Backends return `PhonebookResult`. Driver-level failures must be mapped
//! to `PhonebookError::StoreUnavailable` (or `DuplicateConflict` for a
//! storage-level uniqueness violation) before they leave the backend.
//!
//! ## Identifiers
//!
//! Each backend declares the [`IdentifierShape`] it hands out. An id of the
//! other shape can never match a stored entry, so lookups with it return
//! "absent" rather than an error.

use std::sync::Arc;

use async_trait::async_trait;

use phonebook_core::{Entry, EntryId, Field, IdentifierShape, NewEntry, PhonebookResult};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryEntryStore;
pub use postgres::PostgresEntryStore;

/// Persistence backend for phonebook entries.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Shape of the identifiers this backend assigns.
    fn identifier_shape(&self) -> IdentifierShape;

    /// All entries, in insertion order.
    async fn list(&self) -> PhonebookResult<Vec<Entry>>;

    async fn get(&self, id: &EntryId) -> PhonebookResult<Option<Entry>>;

    /// Store a new entry under a freshly assigned, never reused id.
    async fn insert(&self, entry: NewEntry) -> PhonebookResult<Entry>;

    /// Replace `name`/`number` of an existing entry. `None` if there is no such entry.
    async fn replace(&self, id: &EntryId, entry: NewEntry) -> PhonebookResult<Option<Entry>>;

    /// Remove an entry; `false` if it did not exist.
    async fn remove(&self, id: &EntryId) -> PhonebookResult<bool>;

    async fn count(&self) -> PhonebookResult<u64>;

    /// First field of `entry` already held by another entry (ignoring `exclude`).
    async fn find_duplicate(
        &self,
        entry: &NewEntry,
        exclude: Option<&EntryId>,
    ) -> PhonebookResult<Option<Field>>;
}

#[async_trait]
impl<S> EntryStore for Arc<S>
where
    S: EntryStore + ?Sized,
{
    fn identifier_shape(&self) -> IdentifierShape {
        (**self).identifier_shape()
    }

    async fn list(&self) -> PhonebookResult<Vec<Entry>> {
        (**self).list().await
    }

    async fn get(&self, id: &EntryId) -> PhonebookResult<Option<Entry>> {
        (**self).get(id).await
    }

    async fn insert(&self, entry: NewEntry) -> PhonebookResult<Entry> {
        (**self).insert(entry).await
    }

    async fn replace(&self, id: &EntryId, entry: NewEntry) -> PhonebookResult<Option<Entry>> {
        (**self).replace(id, entry).await
    }

    async fn remove(&self, id: &EntryId) -> PhonebookResult<bool> {
        (**self).remove(id).await
    }

    async fn count(&self) -> PhonebookResult<u64> {
        (**self).count().await
    }

    async fn find_duplicate(
        &self,
        entry: &NewEntry,
        exclude: Option<&EntryId>,
    ) -> PhonebookResult<Option<Field>> {
        (**self).find_duplicate(entry, exclude).await
    }
}
