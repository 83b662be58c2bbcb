//! Typed note actions and per-window session state.
//!
//! The UI layer owns a [`Session`] and turns gestures into [`NoteAction`]s;
//! each action is dispatched to a note [`Collection`] as one
//! read-modify-write cycle.

use crate::collection::Collection;
use crate::error::Result;
use crate::payload::Note;
use crate::record::RecordId;
use crate::store::ReorderOutcome;

#[derive(Debug, Clone, PartialEq)]
pub enum NoteAction {
  Create(Note),
  Edit { id: RecordId, note: Note },
  Delete(RecordId),
  TogglePin(RecordId),
  Reorder { dragged: RecordId, target: RecordId, insert_before: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
  Created(RecordId),
  Edited,
  Deleted,
  /// New pinned state
  Pinned(bool),
  Reordered(ReorderOutcome),
}

impl ActionOutcome {
  /// Short status line for the user
  pub fn describe(&self) -> String {
    match self {
      ActionOutcome::Created(id) => format!("Note saved ({id})"),
      ActionOutcome::Edited => "Note updated".to_string(),
      ActionOutcome::Deleted => "Note deleted".to_string(),
      ActionOutcome::Pinned(true) => "Note pinned".to_string(),
      ActionOutcome::Pinned(false) => "Note unpinned".to_string(),
      ActionOutcome::Reordered(ReorderOutcome::Moved) => "Note moved".to_string(),
      ActionOutcome::Reordered(ReorderOutcome::SameRecord) => "Note left in place".to_string(),
      ActionOutcome::Reordered(ReorderOutcome::CrossPartition) => {
        "Pinned and unpinned notes are ordered separately; pin or unpin first".to_string()
      }
    }
  }
}

impl NoteAction {
  pub async fn dispatch(self, notes: &Collection<Note>) -> Result<ActionOutcome> {
    match self {
      NoteAction::Create(note) => {
        let note = note.validated()?;
        Ok(ActionOutcome::Created(notes.create(note).await?))
      }
      NoteAction::Edit { id, note } => {
        let note = note.validated()?;
        notes.edit(&id, note).await?;
        Ok(ActionOutcome::Edited)
      }
      NoteAction::Delete(id) => {
        notes.delete(&id).await?;
        Ok(ActionOutcome::Deleted)
      }
      NoteAction::TogglePin(id) => Ok(ActionOutcome::Pinned(notes.toggle_pin(&id).await?)),
      NoteAction::Reorder { dragged, target, insert_before } => {
        Ok(ActionOutcome::Reordered(notes.reorder(&dragged, &target, insert_before).await?))
      }
    }
  }
}

/// Which pane is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
  #[default]
  Notes,
  Compose,
  Saved,
  Profile,
}

/// UI state for one open window
#[derive(Debug, Default)]
pub struct Session {
  view: View,
  dragging: Option<RecordId>,
  editing: Option<RecordId>,
}

impl Session {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn view(&self) -> View {
    self.view
  }

  pub fn switch_to(&mut self, view: View) {
    self.view = view;
  }

  /// Open the compose pane on an existing note
  pub fn begin_edit(&mut self, id: RecordId) {
    self.editing = Some(id);
    self.view = View::Compose;
  }

  pub fn editing(&self) -> Option<&RecordId> {
    self.editing.as_ref()
  }

  /// Leave the compose pane without saving
  pub fn cancel_edit(&mut self) {
    self.editing = None;
    self.view = View::Notes;
  }

  /// Turn the compose form into an action and return to the note list
  pub fn submit(&mut self, note: Note) -> NoteAction {
    self.view = View::Notes;
    match self.editing.take() {
      Some(id) => NoteAction::Edit { id, note },
      None => NoteAction::Create(note),
    }
  }

  pub fn begin_drag(&mut self, id: RecordId) {
    self.dragging = Some(id);
  }

  pub fn dragging(&self) -> Option<&RecordId> {
    self.dragging.as_ref()
  }

  pub fn cancel_drag(&mut self) {
    self.dragging = None;
  }

  /// Finish a drag on `target`. Dropping with no drag in flight, or onto the
  /// dragged note itself, yields nothing.
  pub fn drop_on(&mut self, target: RecordId, insert_before: bool) -> Option<NoteAction> {
    let dragged = self.dragging.take()?;
    if dragged == target {
      return None;
    }
    Some(NoteAction::Reorder { dragged, target, insert_before })
  }
}
