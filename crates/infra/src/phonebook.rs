//! Phonebook service: validation + duplicate policy + storage.
//!
//! `Phonebook` is the entry lifecycle the HTTP layer and the seeding CLI
//! talk to. It works the same over any [`EntryStore`]:
//!
//! ```text
//! raw id / payload
//!   ↓
//! 1. Classify identifier (backend's shape)   → MalformedIdentifier
//!   ↓
//! 2. Validate payload                        → ValidationFailed
//!   ↓
//! 3. Duplicate policy (if enabled)           → DuplicateConflict
//!   ↓
//! 4. Store operation                         → StoreUnavailable
//! ```
//!
//! Steps 1-2 never touch the store and are never retried. Nothing here
//! retries store failures either; that is the caller's decision.
//!
//! "No such entry" is a value (`None` / `false`), not an error.

use phonebook_core::{
    Entry, EntryCandidate, EntryId, EntryPolicy, PhonebookError, PhonebookResult, validate,
};

use crate::store::EntryStore;

#[derive(Debug, Clone)]
pub struct Phonebook<S> {
    store: S,
    policy: EntryPolicy,
}

impl<S> Phonebook<S>
where
    S: EntryStore,
{
    pub fn new(store: S, policy: EntryPolicy) -> Self {
        Self { store, policy }
    }

    /// Parse `raw` according to the backend's identifier shape.
    pub fn classify_identifier(&self, raw: &str) -> PhonebookResult<EntryId> {
        self.store.identifier_shape().classify(raw)
    }

    pub async fn list_all(&self) -> PhonebookResult<Vec<Entry>> {
        self.store.list().await
    }

    pub async fn find_by_id(&self, raw_id: &str) -> PhonebookResult<Option<Entry>> {
        let id = self.classify_identifier(raw_id)?;
        self.store.get(&id).await
    }

    pub async fn insert(&self, candidate: EntryCandidate) -> PhonebookResult<Entry> {
        let entry = validate(&candidate)?;

        if self.policy.reject_duplicates {
            if let Some(field) = self.store.find_duplicate(&entry, None).await? {
                tracing::info!(field = field.as_str(), "rejecting duplicate entry");
                return Err(PhonebookError::DuplicateConflict(field));
            }
        }

        let stored = self.store.insert(entry).await?;
        tracing::debug!(entry_id = %stored.id, "entry inserted");
        Ok(stored)
    }

    /// Replace an entry wholesale. `None` when no entry has this id.
    pub async fn update_by_id(
        &self,
        raw_id: &str,
        replacement: EntryCandidate,
    ) -> PhonebookResult<Option<Entry>> {
        let id = self.classify_identifier(raw_id)?;
        let entry = validate(&replacement)?;

        if self.policy.reject_duplicates {
            if let Some(field) = self.store.find_duplicate(&entry, Some(&id)).await? {
                tracing::info!(entry_id = %id, field = field.as_str(), "rejecting duplicate entry");
                return Err(PhonebookError::DuplicateConflict(field));
            }
        }

        let updated = self.store.replace(&id, entry).await?;
        if updated.is_some() {
            tracing::debug!(entry_id = %id, "entry replaced");
        }
        Ok(updated)
    }

    /// Delete an entry. Idempotent: deleting a missing entry yields `false`.
    pub async fn delete_by_id(&self, raw_id: &str) -> PhonebookResult<bool> {
        let id = self.classify_identifier(raw_id)?;
        let removed = self.store.remove(&id).await?;
        if removed {
            tracing::debug!(entry_id = %id, "entry deleted");
        }
        Ok(removed)
    }

    pub async fn count(&self) -> PhonebookResult<u64> {
        self.store.count().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use phonebook_core::{Field, IdentifierShape, NewEntry, ValidationFailure};

    use super::*;
    use crate::store::InMemoryEntryStore;

    fn phonebook() -> Phonebook<InMemoryEntryStore> {
        Phonebook::new(InMemoryEntryStore::new(), EntryPolicy::default())
    }

    async fn seed<S: EntryStore>(book: &Phonebook<S>) -> Vec<Entry> {
        let mut stored = Vec::new();
        for (name, number) in [
            ("Arto Hellas", "040-123456"),
            ("Ada Lovelace", "39-44-5323523"),
            ("Dan Abramov", "12-43-234345"),
            ("Mary Poppendieck", "39-23-6423122"),
        ] {
            stored.push(book.insert(EntryCandidate::new(name, number)).await.unwrap());
        }
        stored
    }

    #[tokio::test]
    async fn insert_then_find_returns_input_plus_id() {
        let book = phonebook();
        let stored = book
            .insert(EntryCandidate::new("Ada Lovelace", "39-44-5323523"))
            .await
            .unwrap();

        let found = book.find_by_id(&stored.id.to_string()).await.unwrap().unwrap();
        assert_eq!(found.name, "Ada Lovelace");
        assert_eq!(found.number, "39-44-5323523");
        assert_eq!(found.id, stored.id);
    }

    #[tokio::test]
    async fn seeded_store_lists_all_four_entries() {
        let book = phonebook();
        let seeded = seed(&book).await;

        let mut listed = book.list_all().await.unwrap();
        let mut expected = seeded.clone();
        listed.sort_by(|a, b| a.name.cmp(&b.name));
        expected.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(listed, expected);
        assert_eq!(book.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let book = phonebook();
        for entry in seed(&book).await {
            let raw = entry.id.to_string();
            assert!(book.delete_by_id(&raw).await.unwrap());
            assert_eq!(book.find_by_id(&raw).await.unwrap(), None);
            assert!(!book.delete_by_id(&raw).await.unwrap());
            assert!(!book.delete_by_id(&raw).await.unwrap());
        }
        assert_eq!(book.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn empty_name_is_rejected_without_touching_the_store() {
        let book = phonebook();
        seed(&book).await;

        let err = book
            .insert(EntryCandidate::new("", "040-123456"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            PhonebookError::Validation(ValidationFailure::MissingField(Field::Name))
        );
        assert_eq!(book.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn update_distinguishes_missing_from_malformed() {
        let book = phonebook();
        seed(&book).await;

        let missing = book
            .update_by_id("999", EntryCandidate::new("Ada Lovelace", "040-654321"))
            .await
            .unwrap();
        assert_eq!(missing, None);

        let err = book
            .update_by_id("not-a-number", EntryCandidate::new("Ada Lovelace", "040-654321"))
            .await
            .unwrap_err();
        assert!(matches!(err, PhonebookError::MalformedIdentifier(_)));
    }

    #[tokio::test]
    async fn update_validates_replacement() {
        let book = phonebook();
        let stored = seed(&book).await.remove(0);

        let err = book
            .update_by_id(&stored.id.to_string(), EntryCandidate::new("Arto Hellas", "abcdef"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PhonebookError::Validation(ValidationFailure::InvalidNumberFormat(_))
        ));
        assert_eq!(
            book.find_by_id(&stored.id.to_string()).await.unwrap(),
            Some(stored)
        );
    }

    #[tokio::test]
    async fn malformed_ids_fail_for_find_and_delete() {
        let book = phonebook();
        assert!(matches!(
            book.find_by_id("abc").await,
            Err(PhonebookError::MalformedIdentifier(_))
        ));
        assert!(matches!(
            book.delete_by_id("abc").await,
            Err(PhonebookError::MalformedIdentifier(_))
        ));
    }

    #[tokio::test]
    async fn duplicates_allowed_by_default() {
        let book = phonebook();
        book.insert(EntryCandidate::new("Arto Hellas", "040-123456"))
            .await
            .unwrap();
        book.insert(EntryCandidate::new("Arto Hellas", "040-123456"))
            .await
            .unwrap();
        assert_eq!(book.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn duplicate_policy_rejects_name_and_number() {
        let book = Phonebook::new(InMemoryEntryStore::new(), EntryPolicy::rejecting_duplicates());
        let arto = book
            .insert(EntryCandidate::new("Arto Hellas", "040-123456"))
            .await
            .unwrap();

        let err = book
            .insert(EntryCandidate::new("Arto Hellas", "040-999999"))
            .await
            .unwrap_err();
        assert_eq!(err, PhonebookError::DuplicateConflict(Field::Name));

        let err = book
            .insert(EntryCandidate::new("Ada Lovelace", "040-123456"))
            .await
            .unwrap_err();
        assert_eq!(err, PhonebookError::DuplicateConflict(Field::Number));
        assert_eq!(book.count().await.unwrap(), 1);

        // Replacing an entry with its own values is not a conflict.
        let same = book
            .update_by_id(&arto.id.to_string(), EntryCandidate::new("Arto Hellas", "040-123456"))
            .await
            .unwrap();
        assert_eq!(same, Some(arto));
    }

    /// Backend whose every operation fails as if the database were gone.
    struct UnreachableStore;

    #[async_trait]
    impl EntryStore for UnreachableStore {
        fn identifier_shape(&self) -> IdentifierShape {
            IdentifierShape::Uuid
        }
        async fn list(&self) -> PhonebookResult<Vec<Entry>> {
            Err(PhonebookError::unavailable("connection refused"))
        }
        async fn get(&self, _id: &EntryId) -> PhonebookResult<Option<Entry>> {
            Err(PhonebookError::unavailable("connection refused"))
        }
        async fn insert(&self, _entry: NewEntry) -> PhonebookResult<Entry> {
            Err(PhonebookError::unavailable("connection refused"))
        }
        async fn replace(&self, _id: &EntryId, _entry: NewEntry) -> PhonebookResult<Option<Entry>> {
            Err(PhonebookError::unavailable("connection refused"))
        }
        async fn remove(&self, _id: &EntryId) -> PhonebookResult<bool> {
            Err(PhonebookError::unavailable("connection refused"))
        }
        async fn count(&self) -> PhonebookResult<u64> {
            Err(PhonebookError::unavailable("connection refused"))
        }
        async fn find_duplicate(
            &self,
            _entry: &NewEntry,
            _exclude: Option<&EntryId>,
        ) -> PhonebookResult<Option<Field>> {
            Err(PhonebookError::unavailable("connection refused"))
        }
    }

    #[tokio::test]
    async fn store_outage_is_not_reported_as_not_found() {
        let store: Arc<dyn EntryStore> = Arc::new(UnreachableStore);
        let book = Phonebook::new(store, EntryPolicy::default());
        let id = uuid::Uuid::nil().to_string();

        assert!(matches!(
            book.find_by_id(&id).await,
            Err(PhonebookError::StoreUnavailable(_))
        ));
        assert!(matches!(
            book.delete_by_id(&id).await,
            Err(PhonebookError::StoreUnavailable(_))
        ));
        assert!(matches!(book.list_all().await, Err(PhonebookError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn validation_runs_before_the_store_is_reached() {
        let book = Phonebook::new(UnreachableStore, EntryPolicy::rejecting_duplicates());

        let err = book
            .insert(EntryCandidate::new("Al", "040-123456"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PhonebookError::Validation(ValidationFailure::TooShortName { .. })
        ));

        let err = book.find_by_id("12").await.unwrap_err();
        assert!(matches!(err, PhonebookError::MalformedIdentifier(_)));
    }
}
