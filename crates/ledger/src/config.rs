//! Configuration management for pinboard
//!
//! Settings come from a JSON file with per-field defaults. `PINBOARD_HOME`
//! overrides where collections are stored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{LedgerError, Result};
use crate::storage::FileStorage;

/// Environment variable overriding the storage directory
pub const HOME_ENV: &str = "PINBOARD_HOME";

const CONFIG_PATHS: [&str; 2] = [".pinboard.json", "pinboard.json"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinboardConfig {
  /// Where collections are stored; `~/.pinboard` when unset
  #[serde(default)]
  pub storage_dir: Option<PathBuf>,
  /// Total bytes the storage backend accepts
  #[serde(default = "default_quota_bytes")]
  pub quota_bytes: usize,
  /// Largest resume file that can be attached
  #[serde(default = "default_resume_max_bytes")]
  pub resume_max_bytes: usize,
  #[serde(default)]
  pub collections: CollectionKeys,
  /// Semantic field name -> extra candidate identifiers tried after the built-in ones
  #[serde(default)]
  pub extra_field_patterns: BTreeMap<String, Vec<String>>,
  #[serde(default)]
  pub outreach: OutreachConfig,
}

/// Storage keys of the named collections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionKeys {
  #[serde(default = "default_notes_key")]
  pub notes: String,
  #[serde(default = "default_jds_key")]
  pub jds: String,
  #[serde(default = "default_profile_key")]
  pub profile: String,
}

/// Drafting of outreach notes for extracted job postings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutreachConfig {
  /// Skills summary written into every draft
  #[serde(default)]
  pub key_focus: String,
  /// Supports `{name}`, `{company}` and `{key_focus}`
  #[serde(default = "default_template")]
  pub template: String,
}

fn default_quota_bytes() -> usize {
  10 * 1024 * 1024
}
fn default_resume_max_bytes() -> usize {
  5 * 1024 * 1024
}
fn default_notes_key() -> String {
  "notes".to_string()
}
fn default_jds_key() -> String {
  "jds".to_string()
}
fn default_profile_key() -> String {
  "jobApplicationData".to_string()
}
fn default_template() -> String {
  "Hi {name}, I saw the opening at {company} and would love to connect. I work mostly with {key_focus}."
    .to_string()
}

impl Default for CollectionKeys {
  fn default() -> Self {
    Self { notes: default_notes_key(), jds: default_jds_key(), profile: default_profile_key() }
  }
}

impl Default for OutreachConfig {
  fn default() -> Self {
    Self { key_focus: String::new(), template: default_template() }
  }
}

impl Default for PinboardConfig {
  fn default() -> Self {
    Self {
      storage_dir: None,
      quota_bytes: default_quota_bytes(),
      resume_max_bytes: default_resume_max_bytes(),
      collections: CollectionKeys::default(),
      extra_field_patterns: BTreeMap::new(),
      outreach: OutreachConfig::default(),
    }
  }
}

impl PinboardConfig {
  /// Load configuration from a file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
      .map_err(|e| LedgerError::Config(format!("{}: {e}", path.display())))
  }

  /// Load an explicit file, else the first config file in the current
  /// directory, else defaults
  pub fn load(explicit: Option<&Path>) -> Result<Self> {
    if let Some(path) = explicit {
      return Self::load_from_file(path);
    }

    for path in &CONFIG_PATHS {
      if Path::new(path).exists() {
        return Self::load_from_file(path);
      }
    }

    Ok(Self::default())
  }

  /// Save configuration to a file
  pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
    let content = serde_json::to_string_pretty(self)?;
    std::fs::write(path, content)?;
    Ok(())
  }

  /// Resolve the storage directory: `PINBOARD_HOME`, then `storage_dir`, then `~/.pinboard`
  pub fn storage_root(&self) -> Result<PathBuf> {
    if let Ok(home) = std::env::var(HOME_ENV) {
      return Ok(PathBuf::from(home));
    }
    if let Some(dir) = &self.storage_dir {
      return Ok(dir.clone());
    }
    dirs::home_dir()
      .map(|home| home.join(".pinboard"))
      .ok_or_else(|| LedgerError::Config("could not determine home directory".to_string()))
  }

  /// File-backed storage rooted at [`storage_root`](Self::storage_root)
  pub fn open_storage(&self) -> Result<FileStorage> {
    Ok(FileStorage::new(self.storage_root()?).with_quota(self.quota_bytes))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;
  use tempfile::TempDir;

  #[test]
  fn test_partial_file_keeps_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pinboard.json");
    std::fs::write(&path, r#"{"quota_bytes": 2048, "collections": {"notes": "scratch"}}"#).unwrap();

    let config = PinboardConfig::load(Some(&path)).unwrap();
    assert_eq!(config.quota_bytes, 2048);
    assert_eq!(config.resume_max_bytes, 5 * 1024 * 1024);
    assert_eq!(config.collections.notes, "scratch");
    assert_eq!(config.collections.profile, "jobApplicationData");
    assert!(config.outreach.template.contains("{name}"));
  }

  #[test]
  fn test_invalid_file_is_config_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.json");
    std::fs::write(&path, "{ nope").unwrap();

    let err = PinboardConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, LedgerError::Config(_)));
  }

  #[test]
  fn test_save_and_reload() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("out.json");
    let mut config = PinboardConfig::default();
    config.extra_field_patterns.insert("email".to_string(), vec!["contact_mail".to_string()]);

    config.save_to_file(&path).unwrap();
    let loaded = PinboardConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.extra_field_patterns["email"], vec!["contact_mail".to_string()]);
  }

  #[test]
  #[serial]
  fn test_home_env_overrides_storage_dir() {
    let config = PinboardConfig { storage_dir: Some(PathBuf::from("/configured")), ..Default::default() };

    std::env::set_var(HOME_ENV, "/from/env");
    assert_eq!(config.storage_root().unwrap(), PathBuf::from("/from/env"));

    std::env::remove_var(HOME_ENV);
    assert_eq!(config.storage_root().unwrap(), PathBuf::from("/configured"));
  }
}
