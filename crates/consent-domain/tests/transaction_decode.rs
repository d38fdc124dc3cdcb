use chrono::{Datelike, NaiveDate, Timelike};
use consent_domain::{date_and_time_label, date_label, DomainError, DomainStubs, Transaction};

#[test]
fn sample_payload_decodes_all_fields() {
  let tx = DomainStubs::sample_transaction().expect("decode sample");
  assert_eq!(tx.transaction_id(), "b80db272b05b9ad007c6833dac68b95ca907594946b2da1929d1f8f95d973b5c");
  assert_eq!(tx.requester_name(), "John Smith");
  assert_eq!(tx.title(), "Provide permission for completing");
  assert_eq!(tx.line_items().len(), 5);
  assert_eq!(tx.line_items()[1].name(), "Legal identity (passport)");
  assert_eq!(tx.line_items()[1].fields_summary(), "Number, Expiration date, Country of issue");
  assert_eq!(tx.verification(), ["digid.nl", "planet-blockchain", "kvk"]);
  assert_eq!(tx.analysis().len(), 2);
  assert_eq!(tx.date().year(), 2019);
  assert_eq!(tx.date().hour(), 15);
  assert!(tx.line_items().iter().all(|i| !i.is_accepted()));
}

#[test]
fn item_ids_are_unique_and_stable() {
  let tx = DomainStubs::sample_transaction().expect("decode sample");
  let first = tx.line_items()[0].id();
  let mut ids: Vec<_> = tx.line_items().iter().map(|i| i.id()).collect();
  ids.sort_by_key(|id| id.to_string());
  ids.dedup();
  assert_eq!(ids.len(), 5);
  assert_eq!(tx.item(first).map(|i| i.name()), Some("Access to your Personal Details"));
}

#[test]
fn legacy_reason_key_is_accepted() {
  let payload = r#"{"transactionID":"t1","item":[],"reason":"old style","verification":[],
                   "date":"2019-04-13T15:51:57+02:00","requesterName":"Ann"}"#;
  let tx = Transaction::from_json(payload).expect("decode");
  assert_eq!(tx.description(), "old style");
  assert!(tx.analysis().is_empty());
  assert_eq!(tx.requester_public_key(), "");
}

#[test]
fn malformed_payloads_fail_to_decode() {
  let missing_items = r#"{"transactionID":"t1","verification":[],"date":"2019-04-13T15:51:57+02:00","requesterName":"A"}"#;
  assert!(matches!(Transaction::from_json(missing_items), Err(DomainError::DecodeFailure(_))));

  let bad_date = r#"{"transactionID":"t1","item":[],"verification":[],"date":"yesterday","requesterName":"A"}"#;
  assert!(matches!(Transaction::from_json(bad_date), Err(DomainError::DecodeFailure(_))));

  let empty_id = r#"{"transactionID":" ","item":[],"verification":[],"date":"2019-04-13T15:51:57+02:00","requesterName":"A"}"#;
  assert!(matches!(Transaction::from_json(empty_id), Err(DomainError::DecodeFailure(_))));

  assert!(matches!(Transaction::from_slice(b"not json"), Err(DomainError::DecodeFailure(_))));
}

#[test]
fn date_labels_follow_calendar_day() {
  let tx = DomainStubs::sample_transaction().expect("decode sample");
  let day = NaiveDate::from_ymd_opt(2019, 4, 13).expect("date");
  assert_eq!(date_label(tx.date(), day), "Today");
  assert_eq!(date_label(tx.date(), day.succ_opt().expect("next day")), "Yesterday");
  let later = NaiveDate::from_ymd_opt(2019, 5, 1).expect("date");
  assert_eq!(date_label(tx.date(), later), "13/04/2019");
  assert_eq!(date_and_time_label(tx.date(), day), "Today / 15:51");
}
