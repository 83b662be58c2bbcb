//! Job application profile: the data the autofill engine writes into forms.
//!
//! Stored as one JSON object under a single key. Experience and education
//! entries are ordered records so they can be edited and removed by id.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{LedgerError, Result};
use crate::record::{parse_tags, Record, RecordId};
use crate::storage::Storage;
use crate::store::RecordStore;

/// Top-level keys an imported profile may carry
pub const PROFILE_KEYS: [&str; 5] = ["personalInfo", "experience", "education", "skills", "resume"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
  pub first_name: String,
  pub last_name: String,
  pub email: String,
  pub phone: String,
  pub address: String,
  pub city: String,
  pub state: String,
  pub zip_code: String,
  pub country: String,
  pub linkedin: String,
  pub github: String,
  pub portfolio: String,
}

impl PersonalInfo {
  /// `(semantic field name, value)` pairs in form order
  pub fn fields(&self) -> [(&'static str, &str); 12] {
    [
      ("firstName", self.first_name.as_str()),
      ("lastName", self.last_name.as_str()),
      ("email", self.email.as_str()),
      ("phone", self.phone.as_str()),
      ("address", self.address.as_str()),
      ("city", self.city.as_str()),
      ("state", self.state.as_str()),
      ("zipCode", self.zip_code.as_str()),
      ("country", self.country.as_str()),
      ("linkedin", self.linkedin.as_str()),
      ("github", self.github.as_str()),
      ("portfolio", self.portfolio.as_str()),
    ]
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
  pub title: String,
  pub company: String,
  /// `YYYY-MM`
  pub start_date: String,
  pub end_date: String,
  /// Still in this role; `end_date` is ignored
  pub current: bool,
  pub location: String,
  pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
  pub school: String,
  pub degree: String,
  pub field: String,
  pub start_year: String,
  pub end_year: String,
  pub gpa: String,
}

fn list_or_text<'de, D>(deserializer: D, separator: char) -> std::result::Result<Vec<String>, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Raw {
    List(Vec<String>),
    Text(String),
  }

  Ok(match Raw::deserialize(deserializer)? {
    Raw::List(items) => items,
    Raw::Text(text) => parse_tags(&text, separator),
  })
}

fn comma_list<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<String>, D::Error> {
  list_or_text(deserializer, ',')
}

fn line_list<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<String>, D::Error> {
  list_or_text(deserializer, '\n')
}

/// Skill lists; older exports stored them as delimited text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
  #[serde(default, deserialize_with = "comma_list")]
  pub technical: Vec<String>,
  #[serde(default, deserialize_with = "line_list")]
  pub certifications: Vec<String>,
  #[serde(default, deserialize_with = "comma_list")]
  pub languages: Vec<String>,
}

impl Skills {
  /// Build from the comma / newline / comma separated form inputs
  pub fn from_text(technical: &str, certifications: &str, languages: &str) -> Self {
    Self {
      technical: parse_tags(technical, ','),
      certifications: parse_tags(certifications, '\n'),
      languages: parse_tags(languages, ','),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resume {
  pub cover_letter: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub file_name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub file_type: Option<String>,
  /// `data:<type>;base64,<payload>`
  #[serde(skip_serializing_if = "Option::is_none")]
  pub file_data: Option<String>,
}

impl Resume {
  /// Store a file as a base64 data URL, refusing files above `limit` bytes
  pub fn attach(&mut self, file_name: &str, file_type: &str, bytes: &[u8], limit: usize) -> Result<()> {
    if bytes.len() > limit {
      return Err(LedgerError::ResumeTooLarge { size: bytes.len(), limit });
    }
    self.file_data = Some(format!("data:{file_type};base64,{}", STANDARD.encode(bytes)));
    self.file_name = Some(file_name.to_string());
    self.file_type = Some(file_type.to_string());
    Ok(())
  }

  /// Decode the attached file, if any
  pub fn file_bytes(&self) -> Result<Option<Vec<u8>>> {
    let Some(data) = &self.file_data else {
      return Ok(None);
    };
    let payload = data
      .split_once(";base64,")
      .map(|(_, payload)| payload)
      .ok_or_else(|| LedgerError::Invalid("resume file is not a base64 data URL".to_string()))?;
    STANDARD
      .decode(payload)
      .map(Some)
      .map_err(|e| LedgerError::Invalid(format!("resume file is not valid base64: {e}")))
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationProfile {
  /// Absent until the personal form is first saved
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub personal_info: Option<PersonalInfo>,
  #[serde(default)]
  pub experience: Vec<Record<Experience>>,
  #[serde(default)]
  pub education: Vec<Record<Education>>,
  #[serde(default)]
  pub skills: Skills,
  #[serde(default)]
  pub resume: Resume,
}

/// Run `mutate` against a record list as an ordered store
fn with_entries<E, T>(
  entries: &mut Vec<Record<E>>,
  mutate: impl FnOnce(&mut RecordStore<E>) -> Result<T>,
) -> Result<T> {
  let mut store = RecordStore::from_records(std::mem::take(entries));
  let outcome = mutate(&mut store);
  *entries = store.into_records();
  outcome
}

impl ApplicationProfile {
  /// Experience entries in display order
  pub fn experience_entries(&self) -> impl Iterator<Item = &Experience> {
    self.experience.iter().map(|record| &record.payload)
  }

  pub fn education_entries(&self) -> impl Iterator<Item = &Education> {
    self.education.iter().map(|record| &record.payload)
  }

  fn normalize(&mut self) {
    self.experience = RecordStore::from_records(std::mem::take(&mut self.experience)).into_records();
    self.education = RecordStore::from_records(std::mem::take(&mut self.education)).into_records();
  }
}

/// Validate an exported profile document.
///
/// The document must be a JSON object carrying at least one of
/// [`PROFILE_KEYS`], and every key present must match its schema.
pub fn parse_import(text: &str) -> Result<ApplicationProfile> {
  let value: Value = serde_json::from_str(text)
    .map_err(|e| LedgerError::MalformedImportPayload(format!("invalid JSON: {e}")))?;

  let Value::Object(fields) = &value else {
    return Err(LedgerError::MalformedImportPayload("expected a JSON object".to_string()));
  };
  if !PROFILE_KEYS.iter().any(|key| fields.contains_key(*key)) {
    return Err(LedgerError::MalformedImportPayload(format!(
      "none of the expected keys present ({})",
      PROFILE_KEYS.join(", ")
    )));
  }

  let mut profile: ApplicationProfile =
    serde_json::from_value(value).map_err(|e| LedgerError::MalformedImportPayload(e.to_string()))?;
  profile.normalize();
  Ok(profile)
}

/// Persists the profile document through a [`Storage`] backend
pub struct ProfileStore {
  storage: Arc<dyn Storage>,
  key: String,
  resume_max_bytes: usize,
}

impl ProfileStore {
  pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
    Self { storage, key: key.into(), resume_max_bytes: 5 * 1024 * 1024 }
  }

  pub fn with_resume_limit(mut self, limit: usize) -> Self {
    self.resume_max_bytes = limit;
    self
  }

  /// `None` when nothing was ever saved
  pub async fn load(&self) -> Result<Option<ApplicationProfile>> {
    let Some(value) = self.storage.get(&self.key).await? else {
      return Ok(None);
    };
    let mut profile: ApplicationProfile = serde_json::from_value(value)?;
    profile.normalize();
    Ok(Some(profile))
  }

  pub async fn save(&self, profile: &ApplicationProfile) -> Result<()> {
    self.storage.set(&self.key, serde_json::to_value(profile)?).await?;
    debug!(key = %self.key, "saved profile");
    Ok(())
  }

  /// One read-modify-write cycle over the whole profile
  pub async fn update<T>(&self, mutate: impl FnOnce(&mut ApplicationProfile) -> Result<T>) -> Result<T> {
    let mut profile = self.load().await?.unwrap_or_default();
    let outcome = mutate(&mut profile)?;
    self.save(&profile).await?;
    Ok(outcome)
  }

  pub async fn set_personal_info(&self, info: PersonalInfo) -> Result<()> {
    self.update(|profile| {
      profile.personal_info = Some(info);
      Ok(())
    })
    .await
  }

  pub async fn add_experience(&self, entry: Experience) -> Result<RecordId> {
    self.update(|profile| with_entries(&mut profile.experience, |store| Ok(store.insert(entry)))).await
  }

  pub async fn edit_experience(&self, id: &RecordId, entry: Experience) -> Result<()> {
    self
      .update(|profile| with_entries(&mut profile.experience, |store| store.edit(id, entry).map(|_| ())))
      .await
  }

  pub async fn delete_experience(&self, id: &RecordId) -> Result<()> {
    self
      .update(|profile| with_entries(&mut profile.experience, |store| store.delete(id).map(|_| ())))
      .await
  }

  pub async fn add_education(&self, entry: Education) -> Result<RecordId> {
    self.update(|profile| with_entries(&mut profile.education, |store| Ok(store.insert(entry)))).await
  }

  pub async fn edit_education(&self, id: &RecordId, entry: Education) -> Result<()> {
    self
      .update(|profile| with_entries(&mut profile.education, |store| store.edit(id, entry).map(|_| ())))
      .await
  }

  pub async fn delete_education(&self, id: &RecordId) -> Result<()> {
    self
      .update(|profile| with_entries(&mut profile.education, |store| store.delete(id).map(|_| ())))
      .await
  }

  pub async fn set_skills(&self, skills: Skills) -> Result<()> {
    self.update(|profile| {
      profile.skills = skills;
      Ok(())
    })
    .await
  }

  pub async fn set_cover_letter(&self, cover_letter: &str) -> Result<()> {
    self.update(|profile| {
      profile.resume.cover_letter = cover_letter.to_string();
      Ok(())
    })
    .await
  }

  pub async fn attach_resume(&self, file_name: &str, file_type: &str, bytes: &[u8]) -> Result<()> {
    let limit = self.resume_max_bytes;
    self.update(|profile| profile.resume.attach(file_name, file_type, bytes, limit)).await
  }

  /// Pretty JSON of the stored document; `{}` when nothing was saved
  pub async fn export(&self) -> Result<String> {
    let value = self.storage.get(&self.key).await?.unwrap_or_else(|| Value::Object(Default::default()));
    Ok(serde_json::to_string_pretty(&value)?)
  }

  /// Replace the stored profile with an exported document.
  ///
  /// A malformed document leaves the stored profile untouched.
  pub async fn import(&self, text: &str) -> Result<ApplicationProfile> {
    let profile = parse_import(text)?;
    self.save(&profile).await?;
    info!(
      experience = profile.experience.len(),
      education = profile.education.len(),
      "imported profile"
    );
    Ok(profile)
  }
}
