use ledger::{Note, Record, RecordId, RecordStore, ReorderOutcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn note(title: &str) -> Note {
  Note::new(title, format!("{title} content"), vec![])
}

fn assert_dense(store: &RecordStore<Note>) {
  for pinned in [true, false] {
    let mut orders: Vec<usize> =
      store.display().filter(|r| r.pinned == pinned).map(|r| r.order).collect();
    orders.sort_unstable();
    let expected: Vec<usize> = (0..orders.len()).collect();
    assert_eq!(orders, expected, "partition pinned={pinned} is not dense");
  }
}

fn snapshot(store: &RecordStore<Note>) -> Vec<(RecordId, bool, usize)> {
  store.display().map(|r| (r.id.clone(), r.pinned, r.order)).collect()
}

#[test]
fn test_random_operations_keep_partitions_dense() {
  let mut rng = StdRng::seed_from_u64(0x5eed);
  let mut store = RecordStore::new();
  let mut ids: Vec<RecordId> = Vec::new();

  for step in 0..500 {
    match rng.gen_range(0..4) {
      0 => ids.push(store.insert(note(&format!("n{step}")))),
      1 if !ids.is_empty() => {
        let id = ids.remove(rng.gen_range(0..ids.len()));
        store.delete(&id).unwrap();
      }
      2 if !ids.is_empty() => {
        let id = &ids[rng.gen_range(0..ids.len())];
        store.toggle_pin(id).unwrap();
      }
      3 if ids.len() > 1 => {
        let dragged = &ids[rng.gen_range(0..ids.len())];
        let target = &ids[rng.gen_range(0..ids.len())];
        store.reorder(dragged, target, rng.gen_bool(0.5)).unwrap();
      }
      _ => {}
    }
    assert_dense(&store);
    assert_eq!(store.len(), ids.len());
  }
}

#[test]
fn test_display_is_idempotent() {
  let mut store = RecordStore::new();
  let ids: Vec<RecordId> = ["a", "b", "c", "d"].iter().map(|t| store.insert(note(t))).collect();
  store.toggle_pin(&ids[3]).unwrap();

  let first = snapshot(&store);
  let second = snapshot(&store);
  assert_eq!(first, second);
}

#[test]
fn test_reorder_and_back_restores_orders() {
  let mut store = RecordStore::new();
  let ids: Vec<RecordId> = ["a", "b", "c", "d", "e"].iter().map(|t| store.insert(note(t))).collect();
  let original = snapshot(&store);

  // Move d before b, then back before e where it came from
  assert_eq!(store.reorder(&ids[3], &ids[1], true).unwrap(), ReorderOutcome::Moved);
  assert_ne!(snapshot(&store), original);
  assert_eq!(store.reorder(&ids[3], &ids[4], true).unwrap(), ReorderOutcome::Moved);
  assert_eq!(snapshot(&store), original);

  // Same round trip inside the pinned partition
  for id in &ids {
    store.toggle_pin(id).unwrap();
  }
  let pinned = snapshot(&store);
  store.reorder(&ids[0], &ids[2], false).unwrap();
  store.reorder(&ids[0], &ids[1], true).unwrap();
  assert_eq!(snapshot(&store), pinned);
}

#[test]
fn test_reorder_between_partitions_is_noop() {
  let mut store = RecordStore::new();
  let ids: Vec<RecordId> = ["a", "b", "c"].iter().map(|t| store.insert(note(t))).collect();
  store.toggle_pin(&ids[0]).unwrap();
  let before = snapshot(&store);

  assert_eq!(store.reorder(&ids[0], &ids[2], true).unwrap(), ReorderOutcome::CrossPartition);
  assert_eq!(store.reorder(&ids[2], &ids[0], false).unwrap(), ReorderOutcome::CrossPartition);
  assert_eq!(snapshot(&store), before);
}

#[test]
fn test_toggle_pin_scenario() {
  let records: Vec<Record<Note>> = serde_json::from_str(
    r#"[
      {"id": 1, "pinned": false, "order": 0, "title": "A", "content": "a"},
      {"id": 2, "pinned": false, "order": 1, "title": "B", "content": "b"}
    ]"#,
  )
  .unwrap();
  let mut store = RecordStore::from_records(records);

  assert!(store.toggle_pin(&RecordId::from("1")).unwrap());

  let one = store.get(&RecordId::from("1")).unwrap();
  assert!(one.pinned);
  assert_eq!(one.order, 0);
  let two = store.get(&RecordId::from("2")).unwrap();
  assert!(!two.pinned);
  assert_eq!(two.order, 0);
}

#[test]
fn test_search_tag_only_match_returns_exactly_that_record() {
  let mut store = RecordStore::new();
  store.insert(Note::new("Standup", "daily sync", vec!["work".to_string()]));
  let tagged = store.insert(Note::new("Taxes", "file forms", vec!["urgent".to_string()]));
  store.insert(Note::new("Groceries", "milk", vec![]));

  let hits = store.search("urgent");
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].id, tagged);
}

#[test]
fn test_empty_search_returns_everything_in_display_order() {
  let mut store = RecordStore::new();
  let ids: Vec<RecordId> = ["a", "b", "c"].iter().map(|t| store.insert(note(t))).collect();
  store.toggle_pin(&ids[1]).unwrap();

  let hits: Vec<&RecordId> = store.search("").into_iter().map(|r| &r.id).collect();
  assert_eq!(hits, vec![&ids[1], &ids[0], &ids[2]]);
}

#[test]
fn test_deleted_ids_are_not_reused() {
  let mut store = RecordStore::new();
  let first = store.insert(note("a"));
  store.delete(&first).unwrap();
  let second = store.insert(note("b"));
  assert_ne!(first, second);
}
