use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use crate::record::Searchable;

/// Free-form note
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub content: String,
  #[serde(default)]
  pub tags: Vec<String>,
}

impl Note {
  pub fn new(title: impl Into<String>, content: impl Into<String>, tags: Vec<String>) -> Self {
    Self { title: title.into(), content: content.into(), tags }
  }

  /// Title and content are both required; surrounding whitespace is dropped
  pub fn validated(self) -> Result<Self> {
    let title = self.title.trim().to_string();
    let content = self.content.trim().to_string();
    if title.is_empty() || content.is_empty() {
      return Err(LedgerError::Invalid("a note needs both a title and content".to_string()));
    }
    Ok(Self { title, content, tags: self.tags })
  }
}

impl Searchable for Note {
  fn title(&self) -> &str {
    &self.title
  }

  fn content(&self) -> &str {
    &self.content
  }

  fn tags(&self) -> &[String] {
    &self.tags
  }
}

/// Details pulled out of a job posting, plus the outreach note drafted for it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDescription {
  #[serde(default)]
  pub recruiter_name: String,
  #[serde(default)]
  pub company_name: String,
  #[serde(default)]
  pub location: String,
  #[serde(default)]
  pub key_focus: String,
  #[serde(default)]
  pub linkedin_note: String,
  /// Human readable extraction time as shown to the user
  #[serde(default)]
  pub date_time: String,
}

impl Searchable for JobDescription {
  fn title(&self) -> &str {
    &self.company_name
  }

  fn content(&self) -> &str {
    &self.linkedin_note
  }

  fn matches_lowercase(&self, needle: &str) -> bool {
    [&self.company_name, &self.recruiter_name, &self.location, &self.key_focus, &self.linkedin_note]
      .iter()
      .any(|field| field.to_lowercase().contains(needle))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_note_validation_trims() {
    let note = Note::new("  Groceries ", " milk ", vec![]).validated().unwrap();
    assert_eq!(note.title, "Groceries");
    assert_eq!(note.content, "milk");
  }

  #[test]
  fn test_note_validation_requires_title_and_content() {
    assert!(Note::new("", "body", vec![]).validated().is_err());
    assert!(Note::new("title", "   ", vec![]).validated().is_err());
  }

  #[test]
  fn test_job_description_search_covers_recruiter_and_location() {
    let jd = JobDescription {
      recruiter_name: "Dana Reyes".to_string(),
      location: "Austin, TX".to_string(),
      ..Default::default()
    };
    assert!(jd.matches_lowercase("dana"));
    assert!(jd.matches_lowercase("austin"));
    assert!(!jd.matches_lowercase("boston"));
  }
}
