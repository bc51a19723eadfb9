//! In-memory entity store.
//!
//! One generic store serves all entity kinds; there is no persistence and
//! no transactional guarantee, by design. Each operation sleeps for a
//! configurable duration first to simulate network latency, matching the
//! mocked REST backend this replaces (`Latency::none()` for tests).

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::errors::StoreError;

/// A record kind the store can manage.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The editable form-field subset of the record.
    type Draft: Clone + Send + Sync + 'static;

    /// Human label used in NotFound messages ("Cliente", "Processo", ...).
    const KIND: &'static str;

    fn id(&self) -> u64;

    /// Snapshot of the editable fields, for pre-filling an edit form or
    /// overlaying a partial update.
    fn to_draft(&self) -> Self::Draft;

    /// Build a fresh record: assigned id, draft fields, `created_at`
    /// stamped, `updated_at` absent.
    fn from_draft(id: u64, draft: Self::Draft, created_at: DateTime<Utc>) -> Self;

    /// Replace the draft-backed fields of an existing record and stamp
    /// `updated_at`. Identity and `created_at` are untouched.
    fn apply_draft(&mut self, draft: Self::Draft, updated_at: DateTime<Utc>);
}

/// Simulated per-verb network delay.
#[derive(Debug, Clone, Copy)]
pub struct Latency {
    pub list: Duration,
    pub get: Duration,
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Latency {
    /// The delays the original mocked services used.
    pub fn simulated() -> Self {
        Self {
            list: Duration::from_millis(500),
            get: Duration::from_millis(300),
            create: Duration::from_millis(800),
            update: Duration::from_millis(800),
            delete: Duration::from_millis(600),
        }
    }

    /// No artificial delay (tests, `--no-latency`).
    pub fn none() -> Self {
        Self {
            list: Duration::ZERO,
            get: Duration::ZERO,
            create: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
        }
    }
}

/// Shared handle to one entity collection, insertion-ordered.
///
/// Cloning shares the underlying collection (teacher pattern: a cheap
/// cloneable handle over `Arc<Mutex<..>>`).
#[derive(Clone)]
pub struct EntityStore<E: Entity> {
    records: Arc<Mutex<Vec<E>>>,
    latency: Latency,
}

impl<E: Entity> EntityStore<E> {
    pub fn new(latency: Latency) -> Self {
        Self::with_records(Vec::new(), latency)
    }

    /// Start from pre-existing records (seed data).
    pub fn with_records(records: Vec<E>, latency: Latency) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            latency,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<E>>, StoreError> {
        self.records.lock().map_err(|_| StoreError::LockPoisoned)
    }

    async fn delay(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }

    /// Snapshot copy of every record, in insertion order.
    pub async fn list(&self) -> Result<Vec<E>, StoreError> {
        self.delay(self.latency.list).await;
        Ok(self.lock()?.clone())
    }

    /// The matching record, or `None` when the id is unknown.
    pub async fn get(&self, id: u64) -> Result<Option<E>, StoreError> {
        self.delay(self.latency.get).await;
        Ok(self.lock()?.iter().find(|r| r.id() == id).cloned())
    }

    /// Append a new record with id `max(existing) + 1` (1 on an empty
    /// collection) and `created_at` set to now.
    pub async fn create(&self, draft: E::Draft) -> Result<E, StoreError> {
        self.delay(self.latency.create).await;
        let mut records = self.lock()?;
        let id = records.iter().map(Entity::id).max().map_or(1, |max| max + 1);
        let record = E::from_draft(id, draft, Utc::now());
        records.push(record.clone());
        tracing::debug!(kind = E::KIND, id, "record created");
        Ok(record)
    }

    /// Replace the draft-backed fields of the record with the given id and
    /// stamp `updated_at`. NotFound when no record matches.
    pub async fn update(&self, id: u64, draft: E::Draft) -> Result<E, StoreError> {
        self.delay(self.latency.update).await;
        let mut records = self.lock()?;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(StoreError::NotFound { kind: E::KIND, id })?;
        record.apply_draft(draft, Utc::now());
        tracing::debug!(kind = E::KIND, id, "record updated");
        Ok(record.clone())
    }

    /// Remove the record permanently. NotFound when no record matches; the
    /// collection is left untouched in that case.
    pub async fn delete(&self, id: u64) -> Result<(), StoreError> {
        self.delay(self.latency.delete).await;
        let mut records = self.lock()?;
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(StoreError::NotFound { kind: E::KIND, id })?;
        records.remove(index);
        tracing::debug!(kind = E::KIND, id, "record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Client, ClientDraft};

    fn store() -> EntityStore<Client> {
        EntityStore::new(Latency::none())
    }

    fn draft(name: &str) -> ClientDraft {
        ClientDraft {
            name: name.into(),
            document: "111".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_one_on_empty_collection() {
        let store = store();
        let created = store.create(draft("Foo")).await.unwrap();
        assert_eq!(created.id, 1);
        assert!(created.updated_at.is_none());
    }

    #[tokio::test]
    async fn create_assigns_max_plus_one() {
        let store = store();
        store.create(draft("A")).await.unwrap();
        store.create(draft("B")).await.unwrap();
        store.delete(1).await.unwrap();
        // Max surviving id is 2, so the next id is 3 even though 1 is free.
        let created = store.create(draft("C")).await.unwrap();
        assert_eq!(created.id, 3);
    }

    #[tokio::test]
    async fn list_returns_snapshot_in_insertion_order() {
        let store = store();
        store.create(draft("A")).await.unwrap();
        store.create(draft("B")).await.unwrap();

        let mut listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "A");
        assert_eq!(listed[1].name, "B");

        // Mutating the snapshot does not touch the store.
        listed.clear();
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn get_finds_by_id_or_returns_none() {
        let store = store();
        let created = store.create(draft("A")).await.unwrap();
        assert_eq!(store.get(created.id).await.unwrap(), Some(created));
        assert_eq!(store.get(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_preserves_unrelated_fields_and_stamps_updated_at() {
        let store = store();
        let created = store.create(draft("A")).await.unwrap();

        let mut patch = ClientDraft::from_record(&created);
        patch.city = "Recife".into();
        let updated = store.update(created.id, patch).await.unwrap();

        assert_eq!(updated.name, "A");
        assert_eq!(updated.city, "Recife");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at.unwrap() >= created.created_at);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = store();
        let err = store.update(7, draft("A")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "Cliente", id: 7 }));
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let store = store();
        let created = store.create(draft("A")).await.unwrap();
        store.delete(created.id).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn delete_unknown_id_leaves_collection_unchanged() {
        let store = store();
        store.create(draft("A")).await.unwrap();
        let err = store.delete(99).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 99, .. }));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clones_share_the_same_collection() {
        let store = store();
        let other = store.clone();
        store.create(draft("A")).await.unwrap();
        assert_eq!(other.list().await.unwrap().len(), 1);
    }
}
