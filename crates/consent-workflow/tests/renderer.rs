use consent_domain::DomainStubs;
use consent_workflow::step::{template, FlowInputs, KeyboardKind, StepInputs};
use consent_workflow::{ContentBlock, ContentRenderer, FlowStep, NoticeKind, ScreenRenderer};

fn inputs_for(steps: &[FlowStep]) -> FlowInputs {
  steps.iter().map(|s| (*s, StepInputs::from_template(template(*s)))).collect()
}

#[test]
fn overview_lists_banners_description_and_items_in_order() {
  let tx = DomainStubs::sample_transaction().expect("sample");
  let screen = ContentRenderer::new().render(FlowStep::Overview, &tx, &FlowInputs::new());

  assert_eq!(screen.title.as_deref(), Some("John Smith"));
  assert!(matches!(&screen.blocks[0], ContentBlock::Notification { kind: NoticeKind::Verification, text }
                   if text == "This company is verified"));
  assert!(matches!(&screen.blocks[1], ContentBlock::Notification { kind: NoticeKind::Warning, .. }));
  match &screen.blocks[2] {
    ContentBlock::Description { date, title, description } => {
      assert_eq!(*date, Some(tx.date()));
      assert_eq!(title, "Provide permission for completing");
      assert_eq!(description, tx.description());
    }
    other => panic!("expected description, got {:?}", other),
  }
  let ids: Vec<_> = tx.line_items().iter().map(|i| (i.id(), false)).collect();
  assert_eq!(screen.line_items(), ids);
  assert_eq!(screen.blocks.len(), 3 + tx.line_items().len());
}

#[test]
fn identity_step_has_prefilled_passport_fields() {
  let tx = DomainStubs::sample_transaction().expect("sample");
  let screen = ContentRenderer::new().render(FlowStep::IdentityDocuments, &tx, &FlowInputs::new());
  assert_eq!(screen.title.as_deref(), Some("Identity documents"));
  assert_eq!(screen.forms(), vec![("Passport number", "J12393496"), ("Expiration date", "02/2022")]);
  assert!(screen.blocks
                .iter()
                .any(|b| matches!(b, ContentBlock::SelectionDisclosure { text } if text == "Country of issue")));
  assert!(screen.blocks
                .iter()
                .all(|b| !matches!(b, ContentBlock::Form { keyboard, .. } if *keyboard != KeyboardKind::NumbersAndPunctuation)));
}

#[test]
fn selection_reflects_chosen_option() {
  let tx = DomainStubs::sample_transaction().expect("sample");
  let mut inputs = inputs_for(&[FlowStep::PaymentMethod]);
  inputs.get_mut(&FlowStep::PaymentMethod).expect("inputs").select(1).expect("select");
  let screen = ContentRenderer::new().render(FlowStep::PaymentMethod, &tx, &inputs);
  let (options, selected) = screen.selection().expect("selection block");
  assert_eq!(options, ["Debit card / Credit card", "Paypal", "Directly from account"]);
  assert_eq!(selected, Some(1));
}

#[test]
fn legal_terms_render_own_items_and_term_documents_show_warning() {
  let tx = DomainStubs::sample_transaction().expect("sample");
  let inputs = inputs_for(&[FlowStep::LegalTerms]);
  let renderer = ContentRenderer::new();

  let legal = renderer.render(FlowStep::LegalTerms, &tx, &inputs);
  let names: Vec<&str> = legal.blocks
                              .iter()
                              .filter_map(|b| match b {
                                ContentBlock::LineItem { name, .. } => Some(name.as_str()),
                                _ => None,
                              })
                              .collect();
  assert_eq!(names, vec!["Privacy policy", "Terms & conditions"]);

  let doc = renderer.render(FlowStep::TermDocument2, &tx, &inputs);
  assert_eq!(doc.notices(NoticeKind::Warning), vec!["You are allowed to cancel this agreement within 14 days."]);
  assert!(matches!(doc.blocks.last(), Some(ContentBlock::Document { .. })));
}

#[test]
fn final_overview_summarises_accepted_items_and_answers() {
  let mut tx = DomainStubs::sample_transaction().expect("sample");
  tx.line_items_mut()[2].set_accepted(true);
  let mut inputs = inputs_for(&[FlowStep::Newsletter, FlowStep::FinalOverview]);
  inputs.get_mut(&FlowStep::Newsletter).expect("inputs").select(0).expect("select");

  let screen = ContentRenderer::new().render(FlowStep::FinalOverview, &tx, &inputs);
  assert_eq!(screen.line_items(), vec![(tx.line_items()[2].id(), true)]);
  assert!(screen.blocks.iter().any(|b| matches!(b, ContentBlock::Description { title, description, .. }
                                                 if title == "Newsletter" && description == "Selected: Yes")));
}

#[test]
fn verification_notice_lists_sources() {
  let tx = DomainStubs::sample_transaction().expect("sample");
  let screen = ContentRenderer::new().render_notice(NoticeKind::Verification, &tx);
  assert!(screen.step.is_none());
  assert_eq!(screen.notices(NoticeKind::Verification), vec!["digid.nl", "planet-blockchain", "kvk"]);
}

#[test]
fn content_blocks_serialize_with_type_tag() {
  let block = ContentBlock::Document { file_name: "terms.txt".into() };
  let value = serde_json::to_value(&block).expect("serialize");
  assert_eq!(value, serde_json::json!({"type": "document", "file_name": "terms.txt"}));
}
