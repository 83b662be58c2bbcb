//! A named record collection persisted through a [`Storage`] backend.
//!
//! Every mutating call is one explicit cycle: read the full collection,
//! apply the change to an in-memory [`RecordStore`], write the full
//! collection back. Nothing is written when the change fails.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

use crate::error::Result;
use crate::record::{Record, RecordId, Searchable};
use crate::storage::Storage;
use crate::store::{RecordStore, ReorderOutcome};

pub struct Collection<P> {
  storage: Arc<dyn Storage>,
  key: String,
  _payload: PhantomData<fn() -> P>,
}

impl<P> Clone for Collection<P> {
  fn clone(&self) -> Self {
    Self { storage: Arc::clone(&self.storage), key: self.key.clone(), _payload: PhantomData }
  }
}

/// Fill `order` from the stored position and `pinned` with false where absent
fn fill_defaults(value: &mut Value) {
  if let Value::Array(items) = value {
    for (position, item) in items.iter_mut().enumerate() {
      if let Value::Object(fields) = item {
        fields.entry("order").or_insert_with(|| Value::from(position));
        fields.entry("pinned").or_insert(Value::Bool(false));
      }
    }
  }
}

impl<P> Collection<P>
where
  P: Serialize + DeserializeOwned + Send,
{
  pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
    Self { storage, key: key.into(), _payload: PhantomData }
  }

  pub fn key(&self) -> &str {
    &self.key
  }

  /// Read the whole collection
  pub async fn load(&self) -> Result<RecordStore<P>> {
    let Some(mut value) = self.storage.get(&self.key).await? else {
      return Ok(RecordStore::new());
    };
    fill_defaults(&mut value);
    let records: Vec<Record<P>> = serde_json::from_value(value)?;
    Ok(RecordStore::from_records(records))
  }

  /// Write the whole collection in display order
  pub async fn save(&self, store: &RecordStore<P>) -> Result<()> {
    let records: Vec<&Record<P>> = store.display().collect();
    let value = serde_json::to_value(records)?;
    self.storage.set(&self.key, value).await?;
    debug!(key = %self.key, count = store.len(), "saved collection");
    Ok(())
  }

  /// One read-modify-write cycle. A failing `mutate` writes nothing.
  pub async fn update<T, F>(&self, mutate: F) -> Result<T>
  where
    F: FnOnce(&mut RecordStore<P>) -> Result<T>,
  {
    let mut store = self.load().await?;
    let outcome = mutate(&mut store)?;
    self.save(&store).await?;
    Ok(outcome)
  }

  pub async fn create(&self, payload: P) -> Result<RecordId> {
    self.update(|store| Ok(store.insert(payload))).await
  }

  pub async fn edit(&self, id: &RecordId, payload: P) -> Result<()> {
    self.update(|store| store.edit(id, payload).map(|_| ())).await
  }

  pub async fn delete(&self, id: &RecordId) -> Result<()> {
    self.update(|store| store.delete(id).map(|_| ())).await
  }

  pub async fn toggle_pin(&self, id: &RecordId) -> Result<bool> {
    self.update(|store| store.toggle_pin(id)).await
  }

  /// Drag reorder; rejected and no-op drops are not written back
  pub async fn reorder(
    &self,
    dragged: &RecordId,
    target: &RecordId,
    insert_before: bool,
  ) -> Result<ReorderOutcome> {
    let mut store = self.load().await?;
    let outcome = store.reorder(dragged, target, insert_before)?;
    if outcome == ReorderOutcome::Moved {
      self.save(&store).await?;
    }
    Ok(outcome)
  }

  /// All records in display order
  pub async fn list(&self) -> Result<Vec<Record<P>>> {
    Ok(self.load().await?.into_records())
  }
}

impl<P> Collection<P>
where
  P: Serialize + DeserializeOwned + Searchable + Clone + Send,
{
  pub async fn search(&self, query: &str) -> Result<Vec<Record<P>>> {
    let store = self.load().await?;
    Ok(store.search(query).into_iter().cloned().collect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::{LedgerError, StorageError};
  use crate::payload::Note;
  use crate::storage::{MemoryStorage, MockStorage};
  use serde_json::json;

  fn notes(storage: Arc<dyn Storage>) -> Collection<Note> {
    Collection::new(storage, "notes")
  }

  #[tokio::test]
  async fn test_empty_collection_loads_empty() {
    let collection = notes(Arc::new(MemoryStorage::new()));
    assert!(collection.load().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_legacy_records_get_position_order() {
    let storage = Arc::new(MemoryStorage::new());
    storage
      .set(
        "notes",
        json!([
          {"id": 3, "title": "third", "content": "c"},
          {"id": 1, "title": "first", "content": "a", "pinned": true},
          {"id": 2, "title": "second", "content": "b"}
        ]),
      )
      .await
      .unwrap();

    let records = notes(storage).list().await.unwrap();
    let summary: Vec<(&str, bool, usize)> =
      records.iter().map(|r| (r.payload.title.as_str(), r.pinned, r.order)).collect();
    assert_eq!(summary, vec![("first", true, 0), ("third", false, 0), ("second", false, 1)]);
  }

  #[tokio::test]
  async fn test_create_then_toggle_persists() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let collection = notes(Arc::clone(&storage));

    let a = collection.create(Note::new("a", "x", vec![])).await.unwrap();
    let _b = collection.create(Note::new("b", "y", vec![])).await.unwrap();
    assert!(collection.toggle_pin(&a).await.unwrap());

    let raw = storage.get("notes").await.unwrap().unwrap();
    assert_eq!(raw[0]["title"], "a");
    assert_eq!(raw[0]["pinned"], true);
    assert_eq!(raw[1]["order"], 0);
  }

  #[tokio::test]
  async fn test_not_found_writes_nothing() {
    let mut storage = MockStorage::new();
    storage.expect_get().returning(|_| Ok(Some(json!([]))));
    storage.expect_set().never();

    let collection = notes(Arc::new(storage));
    let err = collection.delete(&RecordId::from("missing")).await.unwrap_err();
    assert!(err.is_not_found());
  }

  #[tokio::test]
  async fn test_storage_failure_surfaces() {
    let mut storage = MockStorage::new();
    storage.expect_get().returning(|_| Ok(None));
    storage.expect_set().returning(|key, _| {
      Err(StorageError::QuotaExceeded { key: key.to_string(), bytes: 10, quota: 1 })
    });

    let collection = notes(Arc::new(storage));
    let err = collection.create(Note::new("a", "b", vec![])).await.unwrap_err();
    assert!(matches!(err, LedgerError::Storage(StorageError::QuotaExceeded { .. })));
  }

  #[tokio::test]
  async fn test_rejected_reorder_is_not_written() {
    let storage = Arc::new(MemoryStorage::new());
    let collection = notes(storage.clone());
    let a = collection.create(Note::new("a", "x", vec![])).await.unwrap();

    let mut mock = MockStorage::new();
    let snapshot = storage.get("notes").await.unwrap();
    mock.expect_get().returning(move |_| Ok(snapshot.clone()));
    mock.expect_set().never();

    let outcome = notes(Arc::new(mock)).reorder(&a, &a, true).await.unwrap();
    assert_eq!(outcome, ReorderOutcome::SameRecord);
  }
}
