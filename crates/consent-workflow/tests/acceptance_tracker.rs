use consent_domain::{ItemId, LineItem};
use consent_workflow::errors::WorkflowError;
use consent_workflow::step::gate;
use consent_workflow::AcceptanceTracker;

fn items(names: &[&str]) -> Vec<LineItem> {
  names.iter().map(|n| LineItem::new(*n, vec![format!("{} field", n)])).collect()
}

#[test]
fn gate_is_true_only_when_every_item_is_accepted() {
  let mut list = items(&["a", "b", "c"]);
  assert!(!gate(&list));
  let ids: Vec<ItemId> = list.iter().map(|i| i.id()).collect();
  let mut tracker = AcceptanceTracker::new(&mut list);
  assert!(!tracker.set_accepted(ids[0], true).expect("toggle a"));
  assert!(!tracker.set_accepted(ids[1], true).expect("toggle b"));
  assert!(tracker.set_accepted(ids[2], true).expect("toggle c"));
  assert_eq!(tracker.accepted_count(), 3);
  assert!(!tracker.set_accepted(ids[1], false).expect("untoggle b"));
}

#[test]
fn toggle_round_trip_restores_gate() {
  let mut list = items(&["a", "b"]);
  let id = list[0].id();
  let mut tracker = AcceptanceTracker::new(&mut list);
  let before = tracker.all_accepted();
  tracker.set_accepted(id, true).expect("accept");
  let after = tracker.set_accepted(id, false).expect("decline");
  assert_eq!(before, after);
  assert!(tracker.items().iter().all(|i| !i.is_accepted()));
}

#[test]
fn unknown_item_is_an_error_and_changes_nothing() {
  let mut list = items(&["a", "b"]);
  let a = list[0].id();
  let mut tracker = AcceptanceTracker::new(&mut list);
  tracker.set_accepted(a, true).expect("accept a");
  let gate_before = tracker.all_accepted();

  let err = tracker.set_accepted(ItemId::new(), true).unwrap_err();
  assert!(matches!(err, WorkflowError::UnknownItem(_)));
  let err = tracker.set_accepted_by_name("nonexistent-item", true).unwrap_err();
  assert!(matches!(err, WorkflowError::UnknownItem(ref n) if n == "nonexistent-item"));

  assert_eq!(tracker.all_accepted(), gate_before);
  let states: Vec<bool> = tracker.items().iter().map(|i| i.is_accepted()).collect();
  assert_eq!(states, vec![true, false]);
}

#[test]
fn by_name_toggle_hits_first_match_only() {
  let mut list = items(&["dup", "dup"]);
  assert!(list[0].same_name(&list[1]));
  assert_ne!(list[0], list[1]);
  let mut tracker = AcceptanceTracker::new(&mut list);
  assert!(!tracker.set_accepted_by_name("dup", true).expect("toggle"));
  let states: Vec<bool> = tracker.items().iter().map(|i| i.is_accepted()).collect();
  assert_eq!(states, vec![true, false]);
}

#[test]
fn empty_list_is_vacuously_accepted() {
  let mut list: Vec<LineItem> = Vec::new();
  let tracker = AcceptanceTracker::new(&mut list);
  assert!(tracker.all_accepted());
  assert!(gate(&[]));
}
