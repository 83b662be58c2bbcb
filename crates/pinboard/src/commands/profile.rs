use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use ledger::profile::{Education, Experience, PersonalInfo, Skills};
use ledger::{ApplicationProfile, LedgerError, Record, RecordId};
use std::path::Path;

use crate::app::{resolve_id, App};

/// Overwrite each slot whose update was given
fn merge<const N: usize>(updates: [(Option<String>, &mut String); N]) {
  for (value, slot) in updates {
    if let Some(value) = value {
      *slot = value;
    }
  }
}

/// Contact details; omitted flags keep their saved values
#[derive(Args, Debug, Default)]
pub struct PersonalArgs {
  #[arg(long)]
  first_name: Option<String>,
  #[arg(long)]
  last_name: Option<String>,
  #[arg(long)]
  email: Option<String>,
  #[arg(long)]
  phone: Option<String>,
  #[arg(long)]
  address: Option<String>,
  #[arg(long)]
  city: Option<String>,
  #[arg(long)]
  state: Option<String>,
  #[arg(long)]
  zip_code: Option<String>,
  #[arg(long)]
  country: Option<String>,
  #[arg(long)]
  linkedin: Option<String>,
  #[arg(long)]
  github: Option<String>,
  #[arg(long)]
  portfolio: Option<String>,
}

impl PersonalArgs {
  fn apply(self, info: &mut PersonalInfo) {
    merge([
      (self.first_name, &mut info.first_name),
      (self.last_name, &mut info.last_name),
      (self.email, &mut info.email),
      (self.phone, &mut info.phone),
      (self.address, &mut info.address),
      (self.city, &mut info.city),
      (self.state, &mut info.state),
      (self.zip_code, &mut info.zip_code),
      (self.country, &mut info.country),
      (self.linkedin, &mut info.linkedin),
      (self.github, &mut info.github),
      (self.portfolio, &mut info.portfolio),
    ]);
  }
}

#[derive(Args, Debug, Default)]
pub struct ExperienceArgs {
  #[arg(long)]
  title: Option<String>,
  #[arg(long)]
  company: Option<String>,
  /// YYYY-MM
  #[arg(long)]
  start_date: Option<String>,
  #[arg(long)]
  end_date: Option<String>,
  /// Still in this role (`--current false` to clear)
  #[arg(long, num_args = 0..=1, default_missing_value = "true")]
  current: Option<bool>,
  #[arg(long)]
  location: Option<String>,
  #[arg(long)]
  description: Option<String>,
}

impl ExperienceArgs {
  fn apply(self, entry: &mut Experience) {
    merge([
      (self.title, &mut entry.title),
      (self.company, &mut entry.company),
      (self.start_date, &mut entry.start_date),
      (self.end_date, &mut entry.end_date),
      (self.location, &mut entry.location),
      (self.description, &mut entry.description),
    ]);
    if let Some(current) = self.current {
      entry.current = current;
    }
  }
}

#[derive(Args, Debug, Default)]
pub struct EducationArgs {
  #[arg(long)]
  school: Option<String>,
  #[arg(long)]
  degree: Option<String>,
  /// Field of study
  #[arg(long)]
  field: Option<String>,
  #[arg(long)]
  start_year: Option<String>,
  #[arg(long)]
  end_year: Option<String>,
  #[arg(long)]
  gpa: Option<String>,
}

impl EducationArgs {
  fn apply(self, entry: &mut Education) {
    merge([
      (self.school, &mut entry.school),
      (self.degree, &mut entry.degree),
      (self.field, &mut entry.field),
      (self.start_year, &mut entry.start_year),
      (self.end_year, &mut entry.end_year),
      (self.gpa, &mut entry.gpa),
    ]);
  }
}

/// Resolve an entry id and return a copy of its payload
fn find_entry<E: Clone>(entries: &[Record<E>], given: &str) -> Result<(RecordId, E)> {
  let id = resolve_id(entries, given)?;
  let entry = entries
    .iter()
    .find(|record| record.id == id)
    .map(|record| record.payload.clone())
    .ok_or_else(|| LedgerError::NotFound(id.clone()))?;
  Ok((id, entry))
}

async fn stored(app: &App) -> Result<ApplicationProfile> {
  Ok(app.profile().load().await?.unwrap_or_default())
}

/// MIME type recorded with an attached resume
fn resume_type(path: &Path) -> &'static str {
  match path.extension().and_then(|ext| ext.to_str()).map(str::to_lowercase).as_deref() {
    Some("pdf") => "application/pdf",
    Some("doc") => "application/msword",
    Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    Some("txt") => "text/plain",
    _ => "application/octet-stream",
  }
}

fn section(title: &str) {
  println!("{}", title.bold().underline());
}

fn print_profile(profile: &ApplicationProfile) {
  section("Personal");
  match &profile.personal_info {
    Some(info) => {
      for (field, value) in info.fields().iter().filter(|(_, value)| !value.is_empty()) {
        println!("  {:<10} {}", field, value);
      }
    }
    None => println!("  {}", "not set".dimmed()),
  }

  section("Experience");
  for entry in profile.experience_entries() {
    let end = if entry.current { "present" } else { entry.end_date.as_str() };
    println!("  {} at {} ({} - {})", entry.title, entry.company, entry.start_date, end);
  }

  section("Education");
  for entry in profile.education_entries() {
    println!("  {} {}, {} ({})", entry.degree, entry.field, entry.school, entry.end_year);
  }

  section("Skills");
  println!("  Technical:      {}", profile.skills.technical.join(", "));
  println!("  Certifications: {}", profile.skills.certifications.join(", "));
  println!("  Languages:      {}", profile.skills.languages.join(", "));

  section("Resume");
  match &profile.resume.file_name {
    Some(name) => println!("  File: {name}"),
    None => println!("  File: {}", "none".dimmed()),
  }
  let letter = if profile.resume.cover_letter.is_empty() { "none" } else { "saved" };
  println!("  Cover letter: {letter}");
}

pub async fn export(app: &App, output: Option<&Path>) -> Result<()> {
  let json = app.profile().export().await?;
  match output {
    Some(path) => {
      std::fs::write(path, &json).with_context(|| format!("Failed to write {}", path.display()))?;
      herald::success(&format!("Profile exported to {}", path.display()));
    }
    None => println!("{json}"),
  }
  Ok(())
}

/// Replace the stored profile; a malformed file leaves it untouched
pub async fn import(app: &App, file: &Path) -> Result<()> {
  let text = std::fs::read_to_string(file)
    .with_context(|| format!("Failed to read {}", file.display()))?;
  let profile = app.profile().import(&text).await?;
  herald::success(&format!(
    "Profile imported ({} experience, {} education)",
    profile.experience.len(),
    profile.education.len()
  ));
  Ok(())
}

pub async fn show(app: &App) -> Result<()> {
  match app.profile().load().await? {
    Some(profile) => print_profile(&profile),
    None => herald::info("No profile saved yet. Import one with 'pinboard profile import <file>'."),
  }
  Ok(())
}

pub async fn attach_resume(app: &App, file: &Path) -> Result<()> {
  let bytes = std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
  let name = file.file_name().and_then(|name| name.to_str()).unwrap_or("resume");
  app.profile().attach_resume(name, resume_type(file), &bytes).await?;
  herald::success(&format!("Resume attached: {name}"));
  Ok(())
}

/// Merge the given contact details into the saved ones
pub async fn set_personal(app: &App, args: PersonalArgs) -> Result<()> {
  let mut info = stored(app).await?.personal_info.unwrap_or_default();
  args.apply(&mut info);
  app.profile().set_personal_info(info).await?;
  herald::success("Personal information saved");
  Ok(())
}

/// Append an experience entry and print its id
pub async fn add_experience(app: &App, args: ExperienceArgs) -> Result<()> {
  let mut entry = Experience::default();
  args.apply(&mut entry);
  let id = app.profile().add_experience(entry).await?;
  herald::success("Experience added");
  println!("{id}");
  Ok(())
}

pub async fn edit_experience(app: &App, id: &str, args: ExperienceArgs) -> Result<()> {
  let (id, mut entry) = find_entry(&stored(app).await?.experience, id)?;
  args.apply(&mut entry);
  app.profile().edit_experience(&id, entry).await?;
  herald::success("Experience updated");
  Ok(())
}

pub async fn delete_experience(app: &App, id: &str) -> Result<()> {
  let id = resolve_id(&stored(app).await?.experience, id)?;
  app.profile().delete_experience(&id).await?;
  herald::success("Experience deleted");
  Ok(())
}

/// Append an education entry and print its id
pub async fn add_education(app: &App, args: EducationArgs) -> Result<()> {
  let mut entry = Education::default();
  args.apply(&mut entry);
  let id = app.profile().add_education(entry).await?;
  herald::success("Education added");
  println!("{id}");
  Ok(())
}

pub async fn edit_education(app: &App, id: &str, args: EducationArgs) -> Result<()> {
  let (id, mut entry) = find_entry(&stored(app).await?.education, id)?;
  args.apply(&mut entry);
  app.profile().edit_education(&id, entry).await?;
  herald::success("Education updated");
  Ok(())
}

pub async fn delete_education(app: &App, id: &str) -> Result<()> {
  let id = resolve_id(&stored(app).await?.education, id)?;
  app.profile().delete_education(&id).await?;
  herald::success("Education deleted");
  Ok(())
}

/// Replace all three skill lists
pub async fn set_skills(
  app: &App,
  technical: &str,
  certifications: &[String],
  languages: &str,
) -> Result<()> {
  let skills = Skills::from_text(technical, &certifications.join("\n"), languages);
  let count = skills.technical.len() + skills.certifications.len() + skills.languages.len();
  app.profile().set_skills(skills).await?;
  herald::success(&format!("Skills saved ({count} total)"));
  Ok(())
}

/// Save the cover letter from inline text or a file
pub async fn set_cover_letter(app: &App, text: Option<String>, file: Option<&Path>) -> Result<()> {
  let letter = match (text, file) {
    (_, Some(path)) => {
      std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    }
    (Some(text), None) => text,
    (None, None) => String::new(),
  };
  app.profile().set_cover_letter(letter.trim_end()).await?;
  if letter.trim().is_empty() {
    herald::info("Cover letter cleared");
  } else {
    herald::success("Cover letter saved");
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_resume_type_by_extension() {
    assert_eq!(resume_type(Path::new("cv.PDF")), "application/pdf");
    assert_eq!(resume_type(Path::new("cv.docx")), resume_type(Path::new("x.docx")));
    assert_eq!(resume_type(Path::new("cv")), "application/octet-stream");
  }

  #[test]
  fn test_experience_args_keep_unset_fields() {
    let mut entry = Experience { title: "Engineer".into(), company: "Acme".into(), current: true, ..Default::default() };
    ExperienceArgs { company: Some("Beta".into()), current: Some(false), ..Default::default() }.apply(&mut entry);

    assert_eq!(entry.title, "Engineer");
    assert_eq!(entry.company, "Beta");
    assert!(!entry.current);
  }

  #[test]
  fn test_personal_args_merge_into_existing() {
    let mut info = PersonalInfo { first_name: "Sam".into(), email: "old@example.com".into(), ..Default::default() };
    PersonalArgs { email: Some("sam@example.com".into()), city: Some("Austin".into()), ..Default::default() }
      .apply(&mut info);

    assert_eq!(info.first_name, "Sam");
    assert_eq!(info.email, "sam@example.com");
    assert_eq!(info.city, "Austin");
  }
}
