use chrono::{DateTime, Local};
use ledger::config::OutreachConfig;
use ledger::{JobDescription, Record};
use regex::Regex;
use tracing::debug;

use crate::error::{Result, ScoutError};
use crate::note::render_note;

const SEPARATOR: &str = r"---+|={3,}|\n{3,}";

/// Labelled patterns first, then looser fallbacks that lean on capitalisation
const RECRUITER: [&str; 2] = [
  r"(?i)(?:Recruiter|Contact|Hiring Manager):\s*([A-Za-z\s]+)",
  r"([A-Z][a-z]+\s+[A-Z][a-z]+)\s*(?:@|Recruiter|Contact)",
];
const COMPANY: [&str; 2] = [
  r"(?i)(?:Company|Organization):\s*([A-Za-z\s&.,]+)",
  r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\s+(?:LLC|Inc|Corp|Tech|Solutions))",
];
const LOCATION: [&str; 2] =
  [r"(?i)(?:Location|City):\s*([A-Za-z\s,]+)", r"([A-Z][a-z]+,?\s+[A-Z]{2}(?:\s+US)?)"];

/// Display format of `date_time`
const STAMP_FORMAT: &str = "%m/%d/%Y, %I:%M:%S %p";

pub struct Extractor {
  separator: Regex,
  recruiter: Vec<Regex>,
  company: Vec<Regex>,
  location: Vec<Regex>,
}

fn compile(patterns: &[&str]) -> Result<Vec<Regex>> {
  patterns.iter().map(|pattern| Regex::new(pattern).map_err(ScoutError::from)).collect()
}

/// First capture of the first pattern that matches, cut to one line
fn first_capture(patterns: &[Regex], text: &str) -> String {
  patterns
    .iter()
    .find_map(|pattern| pattern.captures(text))
    .and_then(|captures| captures.get(1))
    .and_then(|capture| capture.as_str().trim().lines().next())
    .map(|line| line.trim().to_string())
    .unwrap_or_default()
}

impl Extractor {
  pub fn new() -> Result<Self> {
    Ok(Self {
      separator: Regex::new(SEPARATOR)?,
      recruiter: compile(&RECRUITER)?,
      company: compile(&COMPANY)?,
      location: compile(&LOCATION)?,
    })
  }

  /// Split pasted text on `---`, `===` or two or more blank lines
  pub fn split_postings(&self, text: &str) -> Vec<String> {
    self
      .separator
      .split(text)
      .map(str::trim)
      .filter(|part| !part.is_empty())
      .map(str::to_string)
      .collect()
  }

  /// Pull details out of one posting and draft the outreach note
  pub fn extract(&self, posting: &str, outreach: &OutreachConfig) -> JobDescription {
    self.extract_at(posting, outreach, Local::now())
  }

  pub fn extract_at(
    &self,
    posting: &str,
    outreach: &OutreachConfig,
    now: DateTime<Local>,
  ) -> JobDescription {
    let recruiter_name = first_capture(&self.recruiter, posting);
    let company_name = first_capture(&self.company, posting);
    let location = first_capture(&self.location, posting);
    let linkedin_note =
      render_note(&outreach.template, &recruiter_name, &company_name, &outreach.key_focus);
    debug!(company = %company_name, recruiter = %recruiter_name, "extracted posting");

    JobDescription {
      recruiter_name,
      company_name,
      location,
      key_focus: outreach.key_focus.clone(),
      linkedin_note,
      date_time: now.format(STAMP_FORMAT).to_string(),
    }
  }

  /// Split and extract every posting in `text`
  pub fn extract_all(&self, text: &str, outreach: &OutreachConfig) -> Result<Vec<JobDescription>> {
    let postings = self.split_postings(text);
    if postings.is_empty() {
      return Err(ScoutError::EmptyInput);
    }
    Ok(postings.iter().map(|posting| self.extract(posting, outreach)).collect())
  }
}

/// Saved postings sorted newest first
pub fn newest_first(mut records: Vec<Record<JobDescription>>) -> Vec<Record<JobDescription>> {
  records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
  records
}

#[cfg(test)]
mod tests {
  use super::*;

  fn extractor() -> Extractor {
    Extractor::new().unwrap()
  }

  #[test]
  fn test_split_on_each_separator() {
    let text = "First posting\n-----\nSecond posting\n=====\nThird posting\n\n\n\nFourth";
    let parts = extractor().split_postings(text);
    assert_eq!(parts, vec!["First posting", "Second posting", "Third posting", "Fourth"]);
  }

  #[test]
  fn test_split_drops_empty_parts() {
    assert!(extractor().split_postings("  \n---\n===\n ").is_empty());
    assert_eq!(extractor().split_postings("One\n\nstill one"), vec!["One\n\nstill one"]);
  }

  #[test]
  fn test_labelled_fields() {
    let posting = "Senior Engineer\nCompany: Acme Widgets\nLocation: Austin, TX\nRecruiter: Dana Reyes\n";
    let jd = extractor().extract(posting, &OutreachConfig::default());
    assert_eq!(jd.company_name, "Acme Widgets");
    assert_eq!(jd.location, "Austin, TX");
    assert_eq!(jd.recruiter_name, "Dana Reyes");
  }

  #[test]
  fn test_fallback_fields() {
    let posting =
      "Join Blue Harbor Solutions in Denver, CO US as a data engineer.\nQuestions? Sam Ortiz @ Blue Harbor";
    let jd = extractor().extract(posting, &OutreachConfig::default());
    assert_eq!(jd.company_name, "Join Blue Harbor Solutions");
    assert_eq!(jd.location, "Denver, CO US");
    assert_eq!(jd.recruiter_name, "Sam Ortiz");
  }

  #[test]
  fn test_unknown_fields_are_empty() {
    let jd = extractor().extract("we are hiring", &OutreachConfig::default());
    assert_eq!(jd.recruiter_name, "");
    assert_eq!(jd.company_name, "");
    assert!(jd.linkedin_note.starts_with("Hi [Name],"));
  }

  #[test]
  fn test_extract_all_rejects_blank_input() {
    let err = extractor().extract_all(" \n--- ", &OutreachConfig::default()).unwrap_err();
    assert!(matches!(err, ScoutError::EmptyInput));
  }
}
