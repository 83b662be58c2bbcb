use anyhow::{Context, Result};
use autofill::{fill, Document};
use colored::*;
use std::path::Path;

use crate::app::App;

/// Fill a page snapshot from the saved profile and report what landed where
pub async fn handle(app: &App, snapshot: &Path, output: Option<&Path>) -> Result<()> {
  let text = std::fs::read_to_string(snapshot)
    .with_context(|| format!("Failed to read {}", snapshot.display()))?;
  let mut page = Document::from_json(&text)
    .with_context(|| format!("{} is not a valid page snapshot", snapshot.display()))?;

  let profile = app.profile().load().await?;
  let report = fill(&mut page, profile.as_ref(), &app.patterns());

  for filled in &report.filled {
    let value = page.value(filled.node).unwrap_or_default();
    println!(
      "{} {} {} {}",
      "✓".green(),
      filled.field.cyan(),
      format!("({}, {:?})", filled.node, filled.strategy).dimmed(),
      value.replace('\n', " / ")
    );
  }
  for field in &report.skipped {
    println!("{} {}", "-".yellow(), field.dimmed());
  }

  if let Some(path) = output {
    let json = serde_json::to_string_pretty(&page.to_snapshot())?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    herald::info(&format!("Filled snapshot written to {}", path.display()));
  }

  if report.is_success() {
    herald::success(&report.message());
  } else {
    herald::warn(&report.message());
  }
  Ok(())
}
