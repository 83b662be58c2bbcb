//! Key-value storage seam.
//!
//! A backend stores one JSON value per key. Callers read the whole value,
//! change it in memory and write the whole value back; backends offer no
//! compare-and-swap, so two overlapping cycles on one key race and the
//! later write wins.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::StorageError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Storage: Send + Sync {
  /// Read the value under `key`, `None` when nothing was ever written
  async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

  /// Replace the value under `key`
  async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
}

fn serialized_len(value: &Value) -> Result<usize, StorageError> {
  Ok(serde_json::to_vec(value)?.len())
}

fn check_quota(
  key: &str,
  used_elsewhere: usize,
  bytes: usize,
  quota: Option<usize>,
) -> Result<(), StorageError> {
  match quota {
    Some(quota) if used_elsewhere + bytes > quota => {
      Err(StorageError::QuotaExceeded { key: key.to_string(), bytes, quota })
    }
    _ => Ok(()),
  }
}

/// Process-local storage, mainly for tests and embedding hosts
#[derive(Debug, Default)]
pub struct MemoryStorage {
  entries: Mutex<HashMap<String, Value>>,
  quota: Option<usize>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  /// Reject writes that would push the total serialized size past `quota` bytes
  pub fn with_quota(quota: usize) -> Self {
    Self { entries: Mutex::default(), quota: Some(quota) }
  }
}

#[async_trait]
impl Storage for MemoryStorage {
  async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
    Ok(self.entries.lock().await.get(key).cloned())
  }

  async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
    let mut entries = self.entries.lock().await;

    let bytes = serialized_len(&value)?;
    let mut used_elsewhere = 0;
    for (other, stored) in entries.iter() {
      if other != key {
        used_elsewhere += serialized_len(stored)?;
      }
    }
    check_quota(key, used_elsewhere, bytes, self.quota)?;

    entries.insert(key.to_string(), value);
    Ok(())
  }
}

/// One pretty-printed JSON file per key under a root directory
#[derive(Debug, Clone)]
pub struct FileStorage {
  root: PathBuf,
  quota: Option<usize>,
}

impl FileStorage {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into(), quota: None }
  }

  pub fn with_quota(mut self, quota: usize) -> Self {
    self.quota = Some(quota);
    self
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
    let valid = !key.is_empty()
      && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
      return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(self.root.join(format!("{key}.json")))
  }

  /// A missing root is created on first write; anything else that is not a
  /// directory cannot hold collections
  async fn check_root(&self) -> Result<(), StorageError> {
    match tokio::fs::metadata(&self.root).await {
      Ok(meta) if !meta.is_dir() => {
        Err(StorageError::Unavailable(format!("{} is not a directory", self.root.display())))
      }
      Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
      _ => Ok(()),
    }
  }

  async fn used_elsewhere(&self, skip: &Path) -> Result<usize, StorageError> {
    let mut used = 0;
    let mut entries = match tokio::fs::read_dir(&self.root).await {
      Ok(entries) => entries,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
      Err(e) => return Err(e.into()),
    };
    while let Some(entry) = entries.next_entry().await? {
      let path = entry.path();
      if path != skip && path.extension().and_then(|ext| ext.to_str()) == Some("json") {
        used += entry.metadata().await?.len() as usize;
      }
    }
    Ok(used)
  }
}

#[async_trait]
impl Storage for FileStorage {
  async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
    let path = self.path_for(key)?;
    self.check_root().await?;
    let content = match tokio::fs::read_to_string(&path).await {
      Ok(content) => content,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&content)?))
  }

  async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
    let path = self.path_for(key)?;
    self.check_root().await?;
    let content = serde_json::to_string_pretty(&value)?;

    if self.quota.is_some() {
      let used = self.used_elsewhere(&path).await?;
      check_quota(key, used, content.len(), self.quota)?;
    }

    tokio::fs::create_dir_all(&self.root).await?;
    tokio::fs::write(&path, content).await?;
    debug!(key, path = %path.display(), "wrote storage file");
    Ok(())
  }
}
