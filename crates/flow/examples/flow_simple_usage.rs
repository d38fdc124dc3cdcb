use flow::errors::FlowError;
use flow::service::{FlowService, SubmissionPolicy};
use flow::stubs::RecordingResponder;
use flow::{FlowEngine, Transition};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), FlowError> {
    // Motor de 3 pasos y responder en memoria
    let responder = Arc::new(RecordingResponder::new());
    let service = FlowService::new(responder.clone(), SubmissionPolicy::default());
    let mut engine = FlowEngine::new(3)?;

    // Un paso incompleto no avanza
    let err = engine.advance(false).unwrap_err();
    println!("advance incompleto: {}", err);

    // Recorrer los pasos hasta el envío
    loop {
        match engine.advance(true)? {
            Transition::Moved(i) => println!("movido al paso {}", i),
            Transition::Submit { accepted } => {
                println!("decisión pendiente: accepted={}", accepted);
                break;
            }
        }
    }

    let receipt = service.submit(&mut engine, "tx-demo").await?;
    println!("enviado en {} intento(s): {:?}", receipt.attempts, receipt.decision);
    println!("estado final: {}", engine.state());
    println!("decisiones registradas: {:?}", responder.decisions());
    Ok(())
}
