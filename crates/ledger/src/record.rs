use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque record identifier, unique for the lifetime of a collection.
///
/// New ids are UUID v4 strings. Older data stored millisecond timestamps as
/// JSON numbers; those load as their decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
  pub fn generate() -> Self {
    Self(Uuid::new_v4().to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for RecordId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for RecordId {
  fn from(value: &str) -> Self {
    Self(value.to_string())
  }
}

impl From<String> for RecordId {
  fn from(value: String) -> Self {
    Self(value)
  }
}

impl<'de> Deserialize<'de> for RecordId {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
      Text(String),
      Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
      Raw::Text(text) => RecordId(text),
      Raw::Number(number) => RecordId(number.to_string()),
    })
  }
}

/// A stored entity: ordering metadata plus an opaque payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<P> {
  #[serde(default = "RecordId::generate")]
  pub id: RecordId,
  #[serde(default)]
  pub pinned: bool,
  /// Rank within the record's partition, dense from 0
  #[serde(default)]
  pub order: usize,
  #[serde(default = "Utc::now", alias = "created_at", alias = "date")]
  pub created_at: DateTime<Utc>,
  #[serde(default = "Utc::now", alias = "updated_at")]
  pub updated_at: DateTime<Utc>,
  #[serde(flatten)]
  pub payload: P,
}

impl<P> Record<P> {
  pub fn new(payload: P) -> Self {
    let now = Utc::now();
    Self {
      id: RecordId::generate(),
      pinned: false,
      order: 0,
      created_at: now,
      updated_at: now,
      payload,
    }
  }

  pub fn touch(&mut self) {
    self.updated_at = Utc::now();
  }
}

/// Text a payload exposes to free-text search
pub trait Searchable {
  fn title(&self) -> &str;

  fn content(&self) -> &str;

  fn tags(&self) -> &[String] {
    &[]
  }

  /// Case-insensitive substring match on title, content, or any tag.
  /// `needle` must already be lowercase.
  fn matches_lowercase(&self, needle: &str) -> bool {
    self.title().to_lowercase().contains(needle)
      || self.content().to_lowercase().contains(needle)
      || self.tags().iter().any(|tag| tag.to_lowercase().contains(needle))
  }
}

/// Split a delimited list into trimmed, non-empty entries
pub fn parse_tags(input: &str, separator: char) -> Vec<String> {
  input
    .split(separator)
    .map(str::trim)
    .filter(|tag| !tag.is_empty())
    .map(str::to_string)
    .collect()
}
