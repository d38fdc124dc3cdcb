use chrono::DateTime;
use consent_domain::{LineItem, Transaction};
use consent_workflow::errors::WorkflowError;
use consent_workflow::{FlowPlan, FlowStep, Navigation, NoticeKind, TransactionFlow};
use flow::{FlowError, FlowState, NavigationIntent, RecordingResponder, ResponderError, SubmissionPolicy};
use std::sync::Arc;
use std::time::Duration;

fn three_item_transaction() -> Transaction {
  let date = DateTime::parse_from_rfc3339("2019-04-13T15:51:57+02:00").expect("date");
  let items = vec![LineItem::new("Name", vec!["First name".into()]),
                   LineItem::new("Email", vec!["Address".into()]),
                   LineItem::new("IBAN", vec!["Number".into()])];
  Transaction::from_parts("tx-3", "Title", "Description", date, "Shop", "key", items, vec!["kvk".into()], vec![])
    .expect("transaction")
}

fn fast_policy() -> SubmissionPolicy {
  SubmissionPolicy { timeout: Duration::from_millis(200),
                     max_retries: 1,
                     backoff: Duration::from_millis(1) }
}

fn accept_all(flow: &mut TransactionFlow<RecordingResponder>) {
  let ids: Vec<_> = flow.transaction().line_items().iter().map(|i| i.id()).collect();
  for id in ids {
    flow.set_accepted(id, true).expect("accept item");
  }
}

/// Deja el paso actual en estado completo.
fn complete_current_step(flow: &mut TransactionFlow<RecordingResponder>) {
  match flow.current_step().expect("at a step") {
    FlowStep::Overview => accept_all(flow),
    FlowStep::PersonalDetails => {
      for (i, text) in ["Jane", "Doe", "01/01/1990", "Main street 1", "jane@example.com", "123456789"].iter()
                                                                                                      .enumerate()
      {
        flow.fill_field(i, text).expect("fill field");
      }
    }
    FlowStep::PaymentMethod | FlowStep::BankVerification | FlowStep::Newsletter => {
      flow.select_option(0).expect("select option")
    }
    FlowStep::LegalTerms => {
      flow.set_accepted_by_name("Privacy policy", true).expect("privacy");
      flow.set_accepted_by_name("Terms & conditions", true).expect("terms");
    }
    _ => {}
  }
}

#[tokio::test]
async fn overview_scenario_submits_once_with_accepted_true() {
  let responder = Arc::new(RecordingResponder::new());
  let mut flow = TransactionFlow::new(three_item_transaction(), FlowPlan::Overview, responder.clone()).expect("flow");

  assert!(!flow.all_accepted());
  assert!(!flow.can_advance());
  accept_all(&mut flow);
  assert!(flow.all_accepted());

  let nav = flow.advance().await.expect("advance");
  assert_eq!(nav, NavigationIntent::Dismiss { accepted: true });
  assert_eq!(responder.calls(), 1);
  assert_eq!(responder.decisions(), vec![flow::Decision::new("tx-3", true)]);
  assert_eq!(flow.state(), FlowState::Finished { accepted: true });
  assert_eq!(flow.cursor(), 1);
  assert!(flow.receipt().is_some());
}

#[tokio::test]
async fn advance_requires_completed_step() {
  let responder = Arc::new(RecordingResponder::new());
  let mut flow = TransactionFlow::new(three_item_transaction(), FlowPlan::Classic, responder.clone()).expect("flow");

  let err = flow.advance().await.unwrap_err();
  assert!(matches!(err, WorkflowError::Flow(FlowError::StepNotComplete(0))));
  assert_eq!(flow.cursor(), 0);
  assert_eq!(responder.calls(), 0);
}

#[tokio::test]
async fn full_plan_walks_every_step_in_order() {
  let (mut flow, responder) = consent_workflow::FlowFactory::sample_flow(FlowPlan::Full).expect("sample flow");
  let mut visited = vec![flow.current_step().expect("first step")];
  let mut last_cursor = flow.cursor();

  loop {
    complete_current_step(&mut flow);
    match flow.advance().await.expect("advance") {
      NavigationIntent::Push(screen) => {
        assert!(flow.cursor() > last_cursor);
        last_cursor = flow.cursor();
        visited.push(screen.step.expect("step screen"));
      }
      NavigationIntent::Dismiss { accepted } => {
        assert!(accepted);
        break;
      }
      other => panic!("unexpected navigation {:?}", other),
    }
  }

  assert_eq!(visited, FlowStep::ALL.to_vec());
  assert_eq!(flow.cursor(), FlowStep::ALL.len());
  assert_eq!(responder.decisions().len(), 1);
}

#[tokio::test]
async fn cancel_from_middle_step_declines_once() {
  let (mut flow, responder) = consent_workflow::FlowFactory::sample_flow(FlowPlan::Classic).expect("sample flow");
  complete_current_step(&mut flow);
  flow.advance().await.expect("advance");
  assert_eq!(flow.current_step(), Some(FlowStep::PersonalDetails));

  let nav = flow.cancel().await.expect("cancel");
  assert_eq!(nav, NavigationIntent::Dismiss { accepted: false });
  assert_eq!(flow.cursor(), 1);
  assert_eq!(responder.calls(), 1);
  assert!(!responder.decisions()[0].accepted);

  // Ya terminado: no hay más transiciones
  assert!(matches!(flow.cancel().await.unwrap_err(), WorkflowError::Flow(FlowError::Terminated)));
  assert!(matches!(flow.advance().await.unwrap_err(), WorkflowError::Flow(FlowError::Terminated)));
  assert_eq!(responder.calls(), 1);
}

#[tokio::test]
async fn failed_submission_stays_submitting_until_retry() {
  let responder = Arc::new(RecordingResponder::failing_with(vec![ResponderError::Transport("offline".into()),
                                                                 ResponderError::Transport("offline".into())]));
  let mut flow = TransactionFlow::with_steps(three_item_transaction(),
                                             vec![FlowStep::Overview],
                                             responder.clone(),
                                             fast_policy()).expect("flow");
  accept_all(&mut flow);

  let err = flow.advance().await.unwrap_err();
  assert!(err.is_submission_failure());
  assert_eq!(flow.state(), FlowState::Submitting { accepted: true });
  assert!(flow.current_screen().is_none());

  // No se puede editar mientras la decisión está pendiente
  let id = flow.transaction().line_items()[0].id();
  assert!(matches!(flow.set_accepted(id, false).unwrap_err(),
                   WorkflowError::Flow(FlowError::InvalidTransition { .. })));

  let nav = flow.retry_submission().await.expect("retry");
  assert_eq!(nav, NavigationIntent::Dismiss { accepted: true });
  assert_eq!(responder.calls(), 3);
}

#[tokio::test]
async fn stuck_submission_can_be_cancelled() {
  let responder = Arc::new(RecordingResponder::failing_with(vec![ResponderError::Rejected { status: 500,
                                                                                            message: "x".into() },
                                                                 ResponderError::Rejected { status: 500,
                                                                                            message: "x".into() }]));
  let mut flow = TransactionFlow::with_steps(three_item_transaction(),
                                             vec![FlowStep::Overview],
                                             responder.clone(),
                                             fast_policy()).expect("flow");
  accept_all(&mut flow);
  assert!(flow.advance().await.is_err());

  let nav = flow.cancel().await.expect("cancel");
  assert_eq!(nav, NavigationIntent::Dismiss { accepted: false });
  assert_eq!(responder.decisions(), vec![flow::Decision::new("tx-3", false)]);
}

#[test]
fn invalid_plans_are_rejected() {
  let responder = Arc::new(RecordingResponder::new());
  let err = TransactionFlow::with_steps(three_item_transaction(), vec![], responder.clone(), fast_policy())
    .err()
    .expect("empty plan");
  assert!(matches!(err, WorkflowError::Flow(FlowError::Validation(_))));

  let err = TransactionFlow::with_steps(three_item_transaction(),
                                        vec![FlowStep::Overview, FlowStep::Overview],
                                        responder,
                                        fast_policy()).err()
                                                      .expect("duplicate step");
  assert!(matches!(err, WorkflowError::Validation(_)));
}

#[test]
fn toggles_outside_item_steps_are_unknown_items() {
  let (mut flow, _) = consent_workflow::FlowFactory::sample_flow(FlowPlan::Full).expect("sample flow");
  let err = flow.set_accepted_by_name("nonexistent-item", true).unwrap_err();
  assert!(matches!(err, WorkflowError::UnknownItem(_)));
  assert!(flow.transaction().line_items().iter().all(|i| !i.is_accepted()));
  assert!(!flow.all_accepted());

  let err = flow.fill_field(0, "x").unwrap_err();
  assert!(matches!(err, WorkflowError::Validation(_)));
}

#[test]
fn notice_drill_down_keeps_cursor() {
  let (flow, _) = consent_workflow::FlowFactory::sample_flow(FlowPlan::Full).expect("sample flow");
  let nav: Navigation = flow.open_notice(NoticeKind::Warning).expect("notice");
  let screen = nav.screen().expect("detail screen");
  assert_eq!(screen.notices(NoticeKind::Warning),
             vec!["personal data is GDPR protected data", "banking details is sensitive data"]);
  assert!(matches!(nav, NavigationIntent::PushDetail(_)));
  assert_eq!(flow.cursor(), 0);
}

#[tokio::test]
async fn all_accepted_tracks_transaction_items_on_every_step() {
  let responder = Arc::new(RecordingResponder::new());
  let mut flow = TransactionFlow::new(three_item_transaction(), FlowPlan::Full, responder).expect("flow");
  accept_all(&mut flow);
  flow.advance().await.expect("leave overview");
  assert_eq!(flow.current_step(), Some(FlowStep::PersonalDetails));
  assert!(flow.all_accepted());
  assert!(flow.current_step_accepted());

  let first = flow.transaction().line_items()[0].id();
  let err = flow.set_accepted(first, false).unwrap_err();
  assert!(matches!(err, WorkflowError::UnknownItem(_)));
  assert!(flow.all_accepted());
}

#[tokio::test]
async fn all_accepted_stays_false_after_cancelling_untouched_transaction() {
  let (mut flow, _) = consent_workflow::FlowFactory::sample_flow(FlowPlan::Full).expect("sample flow");
  let nav = flow.cancel().await.expect("cancel");
  assert_eq!(nav, NavigationIntent::Dismiss { accepted: false });
  assert!(flow.transaction().line_items().iter().all(|i| !i.is_accepted()));
  assert!(!flow.all_accepted());
  assert!(flow.current_step_accepted());
}

#[tokio::test]
async fn legal_terms_gate_is_separate_from_transaction_items() {
  let responder = Arc::new(RecordingResponder::new());
  let steps = vec![FlowStep::Overview, FlowStep::LegalTerms];
  let mut flow = TransactionFlow::with_steps(three_item_transaction(), steps, responder, fast_policy()).expect("flow");
  accept_all(&mut flow);
  flow.advance().await.expect("to legal terms");

  assert!(flow.all_accepted());
  assert!(!flow.current_step_accepted());
  let gate = flow.set_accepted_by_name("Privacy policy", true).expect("privacy");
  assert!(!gate);
  assert!(flow.set_accepted_by_name("Terms & conditions", true).expect("terms"));
  assert!(flow.current_step_accepted());
}
