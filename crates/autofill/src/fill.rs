//! Filling a whole application form from a stored profile.
//!
//! Every field attempt is independent. A field with no eligible target, or
//! a write the page rejects, is recorded as skipped and filling carries on.

use ledger::profile::{ApplicationProfile, Education, Experience};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::date::format_date_for_input;
use crate::dom::{Dom, NodeId};
use crate::patterns::{FieldDescriptor, PatternTable};
use crate::resolver::{resolve, write_value, Strategy};
use crate::sections::{find_sections, EDUCATION_SECTIONS, EXPERIENCE_SECTIONS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFill {
  /// `email`, `experience[0].title`, ...
  pub field: String,
  pub node: NodeId,
  #[serde(skip)]
  pub strategy: Strategy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FillReport {
  pub filled: Vec<FieldFill>,
  /// Fields with a value but no eligible target
  pub skipped: Vec<String>,
  /// False when there was no profile data to fill from
  pub had_data: bool,
}

impl FillReport {
  pub fn count(&self) -> usize {
    self.filled.len()
  }

  pub fn is_success(&self) -> bool {
    !self.filled.is_empty()
  }

  pub fn message(&self) -> String {
    if !self.had_data {
      "No data found. Add your information to the profile first.".to_string()
    } else if self.filled.is_empty() {
      "No form fields found".to_string()
    } else {
      format!("Filled {} field(s)", self.filled.len())
    }
  }
}

fn has_fill_data(profile: &ApplicationProfile) -> bool {
  let personal = profile.personal_info.as_ref();
  personal.is_some_and(|info| info.fields().iter().any(|(_, value)| !value.is_empty()))
    || !profile.experience.is_empty()
    || !profile.education.is_empty()
    || !profile.skills.technical.is_empty()
    || !profile.skills.certifications.is_empty()
    || !profile.resume.cover_letter.is_empty()
}

struct Filler<'a, D: Dom + ?Sized> {
  dom: &'a mut D,
  report: FillReport,
}

impl<D: Dom + ?Sized> Filler<'_, D> {
  fn field(&mut self, scope: NodeId, descriptor: Option<&FieldDescriptor>, label: String, value: &str) {
    if value.is_empty() {
      return;
    }
    let Some(found) = descriptor.and_then(|descriptor| resolve(&*self.dom, scope, descriptor)) else {
      self.report.skipped.push(label);
      return;
    };
    match write_value(&mut *self.dom, found.node, value) {
      Ok(()) => {
        let fill = FieldFill { field: label, node: found.node, strategy: found.strategy };
        self.report.filled.push(fill);
      }
      Err(e) => {
        warn!(field = %label, error = %e, "page rejected field value");
        self.report.skipped.push(label);
      }
    }
  }

  fn experience(&mut self, scope: NodeId, index: usize, entry: &Experience, patterns: &PatternTable) {
    let label = |name: &str| format!("experience[{index}].{name}");
    let start = format_date_for_input(&entry.start_date);
    let end = if entry.current { String::new() } else { format_date_for_input(&entry.end_date) };

    self.field(scope, patterns.experience("title"), label("title"), &entry.title);
    self.field(scope, patterns.experience("company"), label("company"), &entry.company);
    self.field(scope, patterns.experience("startDate"), label("startDate"), &start);
    self.field(scope, patterns.experience("endDate"), label("endDate"), &end);
    self.field(scope, patterns.experience("location"), label("location"), &entry.location);
    self.field(scope, patterns.experience("description"), label("description"), &entry.description);
  }

  fn education(&mut self, scope: NodeId, index: usize, entry: &Education, patterns: &PatternTable) {
    let label = |name: &str| format!("education[{index}].{name}");
    self.field(scope, patterns.education("school"), label("school"), &entry.school);
    self.field(scope, patterns.education("degree"), label("degree"), &entry.degree);
    self.field(scope, patterns.education("field"), label("field"), &entry.field);
    self.field(scope, patterns.education("startYear"), label("startYear"), &entry.start_year);
    self.field(scope, patterns.education("endYear"), label("endYear"), &entry.end_year);
    self.field(scope, patterns.education("gpa"), label("gpa"), &entry.gpa);
  }
}

/// Fill every field the profile has a value for. Experience and education
/// entry *i* goes into section *i*; entries beyond the sections found are
/// dropped.
pub fn fill<D: Dom + ?Sized>(
  dom: &mut D,
  profile: Option<&ApplicationProfile>,
  patterns: &PatternTable,
) -> FillReport {
  let Some(profile) = profile.filter(|profile| has_fill_data(profile)) else {
    info!("no profile data to fill from");
    return FillReport::default();
  };

  let root = dom.root();
  let mut filler = Filler { dom, report: FillReport { had_data: true, ..Default::default() } };

  if let Some(info) = &profile.personal_info {
    for (name, value) in info.fields() {
      filler.field(root, patterns.personal(name), name.to_string(), value);
    }
  }

  if !profile.experience.is_empty() {
    let sections = find_sections(&*filler.dom, &EXPERIENCE_SECTIONS);
    for (index, (entry, scope)) in profile.experience_entries().zip(&sections).enumerate() {
      filler.experience(*scope, index, entry, patterns);
    }
    if profile.experience.len() > sections.len() {
      debug!(
        entries = profile.experience.len(),
        sections = sections.len(),
        "experience entries beyond sections dropped"
      );
    }
  }

  if !profile.education.is_empty() {
    let sections = find_sections(&*filler.dom, &EDUCATION_SECTIONS);
    for (index, (entry, scope)) in profile.education_entries().zip(&sections).enumerate() {
      filler.education(*scope, index, entry, patterns);
    }
    if profile.education.len() > sections.len() {
      debug!(
        entries = profile.education.len(),
        sections = sections.len(),
        "education entries beyond sections dropped"
      );
    }
  }

  let skills = &profile.skills;
  filler.field(root, patterns.extra("skills"), "skills".to_string(), &skills.technical.join(", "));
  let certifications = skills.certifications.join("\n");
  filler.field(root, patterns.extra("certification"), "certification".to_string(), &certifications);
  let cover_letter = &profile.resume.cover_letter;
  filler.field(root, patterns.extra("coverLetter"), "coverLetter".to_string(), cover_letter);

  let report = filler.report;
  info!(filled = report.count(), skipped = report.skipped.len(), "form fill finished");
  report
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::dom::{Document, Element};
  use ledger::profile::PersonalInfo;

  #[test]
  fn test_missing_profile_reports_no_data() {
    let mut doc = Document::new();
    let root = doc.root();
    doc.append(root, Element::new("input").with_name("email")).unwrap();

    let report = fill(&mut doc, None, &PatternTable::builtin());
    assert_eq!(report.count(), 0);
    assert!(!report.had_data);
    assert!(report.message().starts_with("No data found"));

    let report = fill(&mut doc, Some(&ApplicationProfile::default()), &PatternTable::builtin());
    assert!(!report.had_data);
    assert!(doc.log().is_empty());
  }

  #[test]
  fn test_personal_fields_fill_and_skip() {
    let mut doc = Document::new();
    let root = doc.root();
    let first = doc.append(root, Element::new("input").with_name("first_name")).unwrap();
    let profile = ApplicationProfile {
      personal_info: Some(PersonalInfo { first_name: "Sam".into(), phone: "555-0100".into(), ..Default::default() }),
      ..Default::default()
    };

    let report = fill(&mut doc, Some(&profile), &PatternTable::builtin());
    assert_eq!(doc.value(first), Some("Sam"));
    assert_eq!(report.count(), 1);
    assert_eq!(report.skipped, vec!["phone"]);
    assert_eq!(report.message(), "Filled 1 field(s)");
  }
}
