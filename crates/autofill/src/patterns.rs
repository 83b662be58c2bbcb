//! Semantic field names and the raw identifiers job sites use for them.

use std::collections::BTreeMap;

/// A semantic field plus the `name`/`id` strings tried for it, in priority order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
  pub name: String,
  pub candidates: Vec<String>,
}

impl FieldDescriptor {
  pub fn new(name: &str, candidates: &[&str]) -> Self {
    Self { name: name.to_string(), candidates: candidates.iter().map(|c| c.to_string()).collect() }
  }

  /// Append candidates not already listed
  pub fn extend(&mut self, extras: &[String]) {
    for extra in extras {
      if !self.candidates.contains(extra) {
        self.candidates.push(extra.clone());
      }
    }
  }
}

type Table = &'static [(&'static str, &'static [&'static str])];

const PERSONAL: Table = &[
  (
    "firstName",
    &[
      "firstname", "first-name", "first_name", "fname", "given-name", "given_name", "firstName", "FirstName",
      "first", "name[first]", "applicant[first_name]",
    ],
  ),
  (
    "lastName",
    &[
      "lastname", "last-name", "last_name", "lname", "family-name", "family_name", "lastName", "LastName", "last",
      "surname", "name[last]", "applicant[last_name]",
    ],
  ),
  (
    "email",
    &["email", "email-address", "email_address", "e-mail", "e_mail", "Email", "EMAIL", "applicant[email]", "user[email]"],
  ),
  (
    "phone",
    &[
      "phone", "phone-number", "phone_number", "telephone", "tel", "mobile", "Phone", "phoneNumber",
      "applicant[phone]", "contact[phone]",
    ],
  ),
  (
    "address",
    &["address", "street-address", "street_address", "street", "address-line-1", "addressLine1", "applicant[address]"],
  ),
  ("city", &["city", "City", "applicant[city]", "location[city]"]),
  ("state", &["state", "State", "province", "applicant[state]", "location[state]"]),
  (
    "zipCode",
    &[
      "zip", "zipcode", "zip-code", "zip_code", "postal-code", "postal_code", "postal", "ZipCode", "applicant[zip]",
      "location[zip]",
    ],
  ),
  ("country", &["country", "Country", "applicant[country]", "location[country]"]),
  (
    "linkedin",
    &["linkedin", "linked-in", "linked_in", "linkedin-url", "linkedin_url", "LinkedIn", "linkedinProfile", "applicant[linkedin]"],
  ),
  ("github", &["github", "github-url", "github_url", "GitHub", "githubProfile", "applicant[github]"]),
  (
    "portfolio",
    &["portfolio", "website", "portfolio-url", "portfolio_url", "personal-website", "applicant[portfolio]", "applicant[website]"],
  ),
];

const EXPERIENCE: Table = &[
  ("title", &["job-title", "job_title", "position", "role", "title", "JobTitle"]),
  ("company", &["company", "employer", "organization", "organization-name", "company-name"]),
  ("startDate", &["start-date", "start_date", "startDate", "employment-start", "from-date"]),
  ("endDate", &["end-date", "end_date", "endDate", "employment-end", "to-date"]),
  ("location", &["location", "job-location", "work-location", "city"]),
  ("description", &["description", "responsibilities", "duties", "summary", "details"]),
];

const EDUCATION: Table = &[
  ("school", &["school", "university", "college", "institution", "school-name"]),
  ("degree", &["degree", "qualification", "education-level", "degree-type"]),
  ("field", &["field", "major", "subject", "field-of-study", "specialization"]),
  ("startYear", &["start-year", "startYear", "from-year", "education-start"]),
  ("endYear", &["end-year", "endYear", "graduation-year", "to-year", "graduation"]),
  ("gpa", &["gpa", "GPA", "grade-point-average", "grade"]),
];

const EXTRAS: Table = &[
  ("skills", &["skills", "technical-skills", "technical_skills", "skill"]),
  ("certification", &["certification", "certifications", "cert"]),
  ("coverLetter", &["cover-letter", "coverletter", "cover_letter", "coverLetter", "cover"]),
];

fn build(table: Table) -> Vec<FieldDescriptor> {
  table.iter().map(|(name, candidates)| FieldDescriptor::new(name, candidates)).collect()
}

/// Descriptor lists for each group of fields a form may carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTable {
  pub personal: Vec<FieldDescriptor>,
  pub experience: Vec<FieldDescriptor>,
  pub education: Vec<FieldDescriptor>,
  /// Skills, certifications and cover letter
  pub extras: Vec<FieldDescriptor>,
}

impl Default for PatternTable {
  fn default() -> Self {
    Self::builtin()
  }
}

impl PatternTable {
  pub fn builtin() -> Self {
    Self {
      personal: build(PERSONAL),
      experience: build(EXPERIENCE),
      education: build(EDUCATION),
      extras: build(EXTRAS),
    }
  }

  /// Add configured candidates after the built-in ones. Keys may be bare
  /// (`email`) or qualified by group (`experience.title`).
  pub fn with_extras(mut self, extras: &BTreeMap<String, Vec<String>>) -> Self {
    for (key, candidates) in extras {
      let (group, field) = match key.split_once('.') {
        Some((group, field)) => (Some(group), field),
        None => (None, key.as_str()),
      };
      let groups: Vec<&mut Vec<FieldDescriptor>> = match group {
        Some("personal") => vec![&mut self.personal],
        Some("experience") => vec![&mut self.experience],
        Some("education") => vec![&mut self.education],
        Some(_) => {
          tracing::warn!(key = %key, "ignoring field patterns for unknown group");
          continue;
        }
        None => vec![&mut self.personal, &mut self.experience, &mut self.education, &mut self.extras],
      };
      for descriptors in groups {
        if let Some(descriptor) = descriptors.iter_mut().find(|d| d.name == field) {
          descriptor.extend(candidates);
        }
      }
    }
    self
  }

  pub fn personal(&self, name: &str) -> Option<&FieldDescriptor> {
    self.personal.iter().find(|d| d.name == name)
  }

  pub fn experience(&self, name: &str) -> Option<&FieldDescriptor> {
    self.experience.iter().find(|d| d.name == name)
  }

  pub fn education(&self, name: &str) -> Option<&FieldDescriptor> {
    self.education.iter().find(|d| d.name == name)
  }

  pub fn extra(&self, name: &str) -> Option<&FieldDescriptor> {
    self.extras.iter().find(|d| d.name == name)
  }
}
