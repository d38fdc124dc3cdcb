// Clean example: runs the classic plan on the sample transaction with an
// in-memory responder, so it needs no server.
use consent_workflow::{FlowFactory, FlowPlan, FlowStep, NoticeKind};
use flow::NavigationIntent;

#[tokio::main]
async fn main() {
    let (mut flow, responder) = FlowFactory::sample_flow(FlowPlan::Classic).expect("sample flow");
    println!("Starting flow for {}", flow.transaction());

    // accept every item on the overview
    let ids: Vec<_> = flow.transaction().line_items().iter().map(|i| i.id()).collect();
    for id in ids {
        let gate = flow.set_accepted(id, true).expect("accept");
        println!("accepted {} -> all accepted: {}", id, gate);
    }
    if let Ok(NavigationIntent::PushDetail(screen)) = flow.open_notice(NoticeKind::Warning) {
        println!("warning details: {:?}", screen.notices(NoticeKind::Warning));
    }

    loop {
        match flow.current_step() {
            Some(FlowStep::PersonalDetails) => {
                for (i, text) in ["Jane", "Doe", "01/01/1990", "Main street 1", "jane@example.com", "123456789"].iter()
                                                                                                                .enumerate()
                {
                    flow.fill_field(i, text).expect("fill");
                }
            }
            Some(FlowStep::PaymentMethod) | Some(FlowStep::BankVerification) => flow.select_option(0).expect("select"),
            _ => {}
        }
        match flow.advance().await.expect("advance") {
            NavigationIntent::Push(screen) => println!("-> {:?}: {} blocks", screen.title, screen.blocks.len()),
            NavigationIntent::Dismiss { accepted } => {
                println!("dismissed, accepted={}", accepted);
                break;
            }
            other => println!("unexpected: {:?}", other),
        }
    }
    println!("decisions sent: {:?}", responder.decisions());
}
