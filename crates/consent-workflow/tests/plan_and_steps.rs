use consent_workflow::{FlowPlan, FlowStep};

#[test]
fn plans_parse_and_expand_to_steps() {
  assert_eq!("Full".parse::<FlowPlan>().expect("full"), FlowPlan::Full);
  assert_eq!(" classic ".parse::<FlowPlan>().expect("classic"), FlowPlan::Classic);
  assert!("express".parse::<FlowPlan>().is_err());
  assert_eq!(FlowPlan::default().steps().len(), 10);
  assert_eq!(FlowPlan::Classic.steps().last(), Some(&FlowStep::BankVerification));
  assert_eq!(FlowPlan::Overview.steps(), vec![FlowStep::Overview]);
  assert_eq!(FlowPlan::Classic.to_string(), "classic");
}

#[test]
fn steps_round_trip_through_names() {
  for step in FlowStep::ALL {
    assert_eq!(step.as_str().parse::<FlowStep>().expect("parse"), step);
    let json = serde_json::to_string(&step).expect("serialize");
    assert_eq!(json, format!("\"{}\"", step));
  }
  assert_eq!(FlowStep::Overview.title(), None);
  assert_eq!(FlowStep::TermDocument1.to_string(), "term-document-1");
}
