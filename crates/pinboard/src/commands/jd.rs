use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use ledger::{JobDescription, LedgerError, Record, RecordId};
use scout::{newest_first, Extractor};
use std::io::Read;
use std::path::Path;

use crate::app::{resolve_id, App};

/// Corrections to an extracted posting; omitted flags keep their values
#[derive(Args, Debug, Default)]
pub struct PostingArgs {
  #[arg(long)]
  recruiter: Option<String>,
  #[arg(long)]
  company: Option<String>,
  #[arg(long)]
  location: Option<String>,
  #[arg(long)]
  key_focus: Option<String>,
  /// Replace the outreach note
  #[arg(long)]
  note: Option<String>,
}

impl PostingArgs {
  fn is_empty(&self) -> bool {
    self.recruiter.is_none()
      && self.company.is_none()
      && self.location.is_none()
      && self.key_focus.is_none()
      && self.note.is_none()
  }

  fn apply(self, jd: &mut JobDescription) {
    let updates = [
      (self.recruiter, &mut jd.recruiter_name),
      (self.company, &mut jd.company_name),
      (self.location, &mut jd.location),
      (self.key_focus, &mut jd.key_focus),
      (self.note, &mut jd.linkedin_note),
    ];
    for (value, slot) in updates {
      if let Some(value) = value {
        *slot = value;
      }
    }
  }
}

fn or_unknown(value: &str) -> &str {
  if value.is_empty() {
    "Not found"
  } else {
    value
  }
}

fn print_posting(jd: &JobDescription, id: Option<&RecordId>) {
  let heading = or_unknown(&jd.company_name).bold();
  match id {
    Some(id) => println!("{}  {}", heading, id.to_string().dimmed()),
    None => println!("{heading}"),
  }
  println!("  Recruiter: {}", or_unknown(&jd.recruiter_name));
  println!("  Location:  {}", or_unknown(&jd.location));
  println!("  Focus:     {}", jd.key_focus);
  println!("  Extracted: {}", jd.date_time);
  for line in jd.linkedin_note.lines() {
    println!("  {}", line.italic());
  }
  println!();
}

fn read_input(input: Option<&Path>) -> Result<String> {
  match input {
    Some(path) => std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read postings from {}", path.display())),
    None => {
      let mut text = String::new();
      std::io::stdin().read_to_string(&mut text).context("Failed to read postings from stdin")?;
      Ok(text)
    }
  }
}

/// Extract every posting in the input and save them in one write
pub async fn extract(app: &App, input: Option<&Path>, no_save: bool) -> Result<()> {
  let text = read_input(input)?;
  let extractor = Extractor::new()?;
  let postings = extractor.extract_all(&text, &app.config.outreach)?;

  if no_save {
    for jd in &postings {
      print_posting(jd, None);
    }
    herald::info(&format!("Extracted {} job description(s); nothing saved", postings.len()));
    return Ok(());
  }

  let saved: Vec<(RecordId, JobDescription)> = app
    .jds()
    .update(|store| Ok(postings.into_iter().map(|jd| (store.insert(jd.clone()), jd)).collect()))
    .await?;

  for (id, jd) in &saved {
    print_posting(jd, Some(id));
  }
  herald::success(&format!("Extracted and saved {} job description(s)", saved.len()));
  Ok(())
}

pub async fn list(app: &App) -> Result<()> {
  let saved: Vec<Record<JobDescription>> = newest_first(app.jds().list().await?);
  if saved.is_empty() {
    herald::info("No saved job descriptions");
    return Ok(());
  }
  for record in &saved {
    print_posting(&record.payload, Some(&record.id));
  }
  Ok(())
}

pub async fn delete(app: &App, id: &str) -> Result<()> {
  let id = resolve_id(&app.jds().list().await?, id)?;
  app.jds().delete(&id).await?;
  herald::success("Job description deleted");
  Ok(())
}

/// Correct fields the extractor got wrong
pub async fn edit(app: &App, id: &str, args: PostingArgs) -> Result<()> {
  let jds = app.jds();
  let store = jds.load().await?;
  let id = resolve_id(&store.display().cloned().collect::<Vec<_>>(), id)?;
  let mut jd = store.get(&id).map(|record| record.payload.clone()).ok_or_else(|| LedgerError::NotFound(id.clone()))?;

  if args.is_empty() {
    herald::info("Nothing to change");
    return Ok(());
  }
  args.apply(&mut jd);
  jds.edit(&id, jd.clone()).await?;
  print_posting(&jd, Some(&id));
  herald::success("Job description updated");
  Ok(())
}
