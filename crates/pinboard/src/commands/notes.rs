use anyhow::Result;
use colored::*;
use ledger::actions::ActionOutcome;
use ledger::store::ReorderOutcome;
use ledger::{parse_tags, LedgerError, Note, NoteAction, Record, RecordId, Session, View};

use crate::app::{resolve_id, App};

fn tags_from(input: Option<&str>) -> Vec<String> {
  input.map(|tags| parse_tags(tags, ',')).unwrap_or_default()
}

async fn resolve(app: &App, given: &str) -> Result<RecordId> {
  resolve_id(&app.notes().list().await?, given)
}

async fn run(app: &App, action: NoteAction) -> Result<ActionOutcome> {
  let outcome = action.dispatch(&app.notes()).await?;
  match &outcome {
    ActionOutcome::Reordered(ReorderOutcome::CrossPartition) => herald::warn(&outcome.describe()),
    ActionOutcome::Reordered(ReorderOutcome::SameRecord) => herald::info(&outcome.describe()),
    _ => herald::success(&outcome.describe()),
  }
  Ok(outcome)
}

fn print_note(record: &Record<Note>) {
  let marker = if record.pinned { "*".yellow().bold() } else { " ".normal() };
  println!("{} {}  {}", marker, record.payload.title.bold(), record.id.to_string().dimmed());
  for line in record.payload.content.lines() {
    println!("    {line}");
  }
  if !record.payload.tags.is_empty() {
    let tags: Vec<String> = record.payload.tags.iter().map(|tag| format!("#{tag}")).collect();
    println!("    {}", tags.join(" ").cyan());
  }
}

/// Save a new note and print its id
pub async fn add(app: &App, title: String, content: String, tags: Option<String>) -> Result<()> {
  let mut session = Session::new();
  session.switch_to(View::Compose);
  let action = session.submit(Note::new(title, content, tags_from(tags.as_deref())));

  if let ActionOutcome::Created(id) = run(app, action).await? {
    println!("{id}");
  }
  Ok(())
}

pub async fn list(app: &App) -> Result<()> {
  let notes = app.notes().list().await?;
  if notes.is_empty() {
    herald::info("No notes yet");
    return Ok(());
  }
  for record in &notes {
    print_note(record);
  }
  Ok(())
}

pub async fn search(app: &App, query: &str) -> Result<()> {
  let found = app.notes().search(query).await?;
  if found.is_empty() {
    herald::info(&format!("No notes match '{query}'"));
    return Ok(());
  }
  for record in &found {
    print_note(record);
  }
  Ok(())
}

/// Replace the given parts of a note, keeping the rest
pub async fn edit(
  app: &App,
  id: &str,
  title: Option<String>,
  content: Option<String>,
  tags: Option<String>,
) -> Result<()> {
  let store = app.notes().load().await?;
  let id = resolve_id(&store.display().cloned().collect::<Vec<_>>(), id)?;
  let current = store.get(&id).ok_or_else(|| LedgerError::NotFound(id.clone()))?;

  let mut session = Session::new();
  session.begin_edit(id);
  if title.is_none() && content.is_none() && tags.is_none() {
    session.cancel_edit();
    herald::info("Nothing to change");
    return Ok(());
  }

  let note = Note {
    title: title.unwrap_or_else(|| current.payload.title.clone()),
    content: content.unwrap_or_else(|| current.payload.content.clone()),
    tags: match tags {
      Some(tags) => tags_from(Some(&tags)),
      None => current.payload.tags.clone(),
    },
  };

  run(app, session.submit(note)).await?;
  Ok(())
}

pub async fn delete(app: &App, id: &str) -> Result<()> {
  let id = resolve(app, id).await?;
  run(app, NoteAction::Delete(id)).await?;
  Ok(())
}

pub async fn pin(app: &App, id: &str) -> Result<()> {
  let id = resolve(app, id).await?;
  run(app, NoteAction::TogglePin(id)).await?;
  Ok(())
}

/// Drop `id` before `target`, or after it with `after`
pub async fn move_note(app: &App, id: &str, target: &str, after: bool) -> Result<()> {
  let notes = app.notes().list().await?;
  let dragged = resolve_id(&notes, id)?;
  let target = resolve_id(&notes, target)?;

  let mut session = Session::new();
  session.begin_drag(dragged);
  match session.drop_on(target, !after) {
    Some(action) => {
      run(app, action).await?;
    }
    None => herald::info(&ActionOutcome::Reordered(ReorderOutcome::SameRecord).describe()),
  }
  Ok(())
}
