//! In-memory ordered record store.
//!
//! Records live in two partitions, pinned and unpinned, each with its own
//! dense `order` (0..n-1). Every mutation leaves both partitions dense.
//! Display order is the pinned partition by `order`, then the unpinned one.

use tracing::debug;

use crate::error::{LedgerError, Result};
use crate::record::{Record, RecordId, Searchable};

/// Result of a drag reorder request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOutcome {
  Moved,
  /// Dragged onto itself; nothing changed
  SameRecord,
  /// Dragged across the pinned boundary; rejected, nothing changed
  CrossPartition,
}

#[derive(Debug, Clone)]
pub struct RecordStore<P> {
  records: Vec<Record<P>>,
}

impl<P> Default for RecordStore<P> {
  fn default() -> Self {
    Self { records: Vec::new() }
  }
}

impl<P> RecordStore<P> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adopt stored records, repairing gaps and duplicates in `order`.
  ///
  /// Within a partition, ties keep their stored sequence.
  pub fn from_records(records: Vec<Record<P>>) -> Self {
    let mut store = Self { records };
    store.normalize();
    store
  }

  /// Consume the store, yielding records in display order
  pub fn into_records(self) -> Vec<Record<P>> {
    let sequence: Vec<usize> = self.display_indices().collect();
    let mut slots: Vec<Option<Record<P>>> = self.records.into_iter().map(Some).collect();
    sequence.into_iter().filter_map(|index| slots[index].take()).collect()
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  pub fn get(&self, id: &RecordId) -> Option<&Record<P>> {
    self.records.iter().find(|record| &record.id == id)
  }

  pub fn count_partition(&self, pinned: bool) -> usize {
    self.records.iter().filter(|record| record.pinned == pinned).count()
  }

  /// Add a record at the tail of the unpinned partition
  pub fn append(&mut self, mut record: Record<P>) -> &Record<P> {
    record.pinned = false;
    record.order = self.count_partition(false);
    debug!(id = %record.id, order = record.order, "appending record");
    self.records.push(record);
    &self.records[self.records.len() - 1]
  }

  /// Wrap a payload in a fresh record and append it
  pub fn insert(&mut self, payload: P) -> RecordId {
    self.append(Record::new(payload)).id.clone()
  }

  /// Replace a record's payload
  pub fn edit(&mut self, id: &RecordId, payload: P) -> Result<&Record<P>> {
    let index = self.position(id)?;
    let record = &mut self.records[index];
    record.payload = payload;
    record.touch();
    Ok(&*record)
  }

  /// Remove a record and close the gap it leaves
  pub fn delete(&mut self, id: &RecordId) -> Result<Record<P>> {
    let index = self.position(id)?;
    let removed = self.records.remove(index);
    self.normalize();
    debug!(id = %removed.id, remaining = self.records.len(), "deleted record");
    Ok(removed)
  }

  /// Flip `pinned`. The record joins the tail of its new partition.
  ///
  /// Returns the new pinned state.
  pub fn toggle_pin(&mut self, id: &RecordId) -> Result<bool> {
    let index = self.position(id)?;
    let was_pinned = self.records[index].pinned;
    let tail = self.count_partition(!was_pinned);

    let record = &mut self.records[index];
    record.pinned = !was_pinned;
    record.order = tail;
    record.touch();

    self.renumber(was_pinned);
    Ok(!was_pinned)
  }

  /// Move `dragged` next to `target` within their shared partition.
  ///
  /// Both ids must exist. Dropping across the pinned boundary is rejected
  /// without changes; pin or unpin first.
  pub fn reorder(
    &mut self,
    dragged: &RecordId,
    target: &RecordId,
    insert_before: bool,
  ) -> Result<ReorderOutcome> {
    let dragged_index = self.position(dragged)?;
    let target_index = self.position(target)?;

    if dragged_index == target_index {
      return Ok(ReorderOutcome::SameRecord);
    }

    let pinned = self.records[dragged_index].pinned;
    if self.records[target_index].pinned != pinned {
      debug!(%dragged, %target, "reorder across pinned boundary ignored");
      return Ok(ReorderOutcome::CrossPartition);
    }

    let mut sequence = self.partition_indices(pinned);
    let from = sequence.iter().position(|&index| index == dragged_index).unwrap_or_default();
    let target_rank = sequence.iter().position(|&index| index == target_index).unwrap_or_default();

    sequence.remove(from);
    let wanted = if insert_before { target_rank } else { target_rank + 1 };
    let at = if wanted > from { wanted - 1 } else { wanted };
    sequence.insert(at, dragged_index);

    for (rank, index) in sequence.into_iter().enumerate() {
      self.records[index].order = rank;
    }
    Ok(ReorderOutcome::Moved)
  }

  /// Records in display order: pinned by rank, then unpinned by rank.
  ///
  /// Recomputed on every call.
  pub fn display(&self) -> impl Iterator<Item = &Record<P>> + '_ {
    self.display_indices().map(move |index| &self.records[index])
  }

  /// Re-enumerate both partitions densely
  pub fn normalize(&mut self) {
    self.renumber(true);
    self.renumber(false);
  }

  fn display_indices(&self) -> impl Iterator<Item = usize> {
    self.partition_indices(true).into_iter().chain(self.partition_indices(false))
  }

  fn position(&self, id: &RecordId) -> Result<usize> {
    self
      .records
      .iter()
      .position(|record| &record.id == id)
      .ok_or_else(|| LedgerError::NotFound(id.clone()))
  }

  /// Indices of one partition sorted by rank, ties in stored sequence
  fn partition_indices(&self, pinned: bool) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..self.records.len())
      .filter(|&index| self.records[index].pinned == pinned)
      .collect();
    indices.sort_by_key(|&index| self.records[index].order);
    indices
  }

  fn renumber(&mut self, pinned: bool) {
    for (rank, index) in self.partition_indices(pinned).into_iter().enumerate() {
      self.records[index].order = rank;
    }
  }
}

impl<P: Searchable> RecordStore<P> {
  /// Case-insensitive match on title, content, or any tag, in display order.
  ///
  /// An empty query returns every record.
  pub fn search(&self, query: &str) -> Vec<&Record<P>> {
    if query.is_empty() {
      return self.display().collect();
    }
    let needle = query.to_lowercase();
    self.display().filter(|record| record.payload.matches_lowercase(&needle)).collect()
  }
}
