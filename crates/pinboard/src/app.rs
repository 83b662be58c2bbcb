use anyhow::{anyhow, Context, Result};
use autofill::PatternTable;
use ledger::{Collection, JobDescription, Note, PinboardConfig, ProfileStore, Record, RecordId, Storage};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Loaded configuration plus the storage every command works against
pub struct App {
  pub config: PinboardConfig,
  storage: Arc<dyn Storage>,
}

impl App {
  pub fn load(config_path: Option<&Path>) -> Result<Self> {
    let config = PinboardConfig::load(config_path).context("Failed to load configuration")?;
    let storage = config.open_storage().context("Failed to open storage")?;
    debug!(root = %storage.root().display(), "opened storage");
    Ok(Self { config, storage: Arc::new(storage) })
  }

  pub fn notes(&self) -> Collection<Note> {
    Collection::new(Arc::clone(&self.storage), self.config.collections.notes.clone())
  }

  pub fn jds(&self) -> Collection<JobDescription> {
    Collection::new(Arc::clone(&self.storage), self.config.collections.jds.clone())
  }

  pub fn profile(&self) -> ProfileStore {
    ProfileStore::new(Arc::clone(&self.storage), self.config.collections.profile.clone())
      .with_resume_limit(self.config.resume_max_bytes)
  }

  pub fn patterns(&self) -> PatternTable {
    PatternTable::builtin().with_extras(&self.config.extra_field_patterns)
  }
}

/// Expand a unique id prefix to the full id. An unknown prefix is passed
/// through unchanged so the store reports it as missing.
pub fn resolve_id<P>(records: &[Record<P>], given: &str) -> Result<RecordId> {
  let matches: Vec<&RecordId> =
    records.iter().map(|record| &record.id).filter(|id| id.as_str().starts_with(given)).collect();

  if let Some(exact) = matches.iter().find(|id| id.as_str() == given) {
    return Ok((*exact).clone());
  }
  match matches.as_slice() {
    [only] => Ok((*only).clone()),
    [] => Ok(RecordId::from(given)),
    _ => Err(anyhow!("Id prefix '{given}' matches {} records; use more characters", matches.len())),
  }
}
