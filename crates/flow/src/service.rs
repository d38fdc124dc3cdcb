// Archivo: service.rs
// Propósito: implementar `FlowService`, la capa que orquesta el motor y el
// responder: toma la decisión pendiente del `FlowEngine`, la envía con
// timeout y reintento, y actualiza el estado según el resultado.
use crate::domain::{Decision, SubmissionReceipt};
use crate::engine::FlowEngine;
use crate::errors::{FlowError, ResponderError, Result};
use crate::responder::Responder;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;

/// Política de envío de la decisión.
///
/// Sólo se reintentan errores recuperables (`ResponderError::is_recoverable`).
/// La espera entre intentos crece de forma exponencial: `backoff`,
/// `2 * backoff`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionPolicy {
    pub timeout: Duration,
    pub max_retries: u32,
    pub backoff: Duration,
}

impl Default for SubmissionPolicy {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(15),
               max_retries: 1,
               backoff: Duration::from_millis(500) }
    }
}

/// Servicio de alto nivel para enviar decisiones.
pub struct FlowService<R>
    where R: Responder + ?Sized
{
    responder: Arc<R>,
    policy: SubmissionPolicy,
}

impl<R> FlowService<R> where R: Responder + ?Sized
{
    /// Crea el servicio inyectando el responder y la política de envío.
    pub fn new(responder: Arc<R>, policy: SubmissionPolicy) -> Self {
        Self { responder, policy }
    }

    pub fn policy(&self) -> SubmissionPolicy {
        self.policy
    }

    pub fn responder(&self) -> &Arc<R> {
        &self.responder
    }

    /// Envía la decisión pendiente del motor para `transaction_id`.
    ///
    /// - Éxito: el motor pasa a `Finished` y se devuelve el comprobante.
    /// - Fallo: el motor sigue en `Submitting` y se devuelve
    ///   `FlowError::SubmissionFailure`.
    pub async fn submit(&self, engine: &mut FlowEngine, transaction_id: &str) -> Result<SubmissionReceipt> {
        let accepted = engine.begin_submission()?;
        let decision = Decision::new(transaction_id, accepted);
        match self.dispatch(&decision).await {
            Ok(attempts) => {
                engine.complete_submission()?;
                info!("decisión {} enviada para {} en {} intento(s)",
                      if accepted { "aceptada" } else { "rechazada" },
                      transaction_id,
                      attempts);
                Ok(SubmissionReceipt { decision, attempts, submitted_at: Utc::now() })
            }
            Err(e) => {
                engine.fail_submission(&e);
                Err(FlowError::SubmissionFailure(e))
            }
        }
    }

    /// Llama al responder aplicando timeout y reintentos. Devuelve el número
    /// de intentos usados.
    pub async fn dispatch(&self, decision: &Decision) -> std::result::Result<u32, ResponderError> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let outcome = match tokio::time::timeout(self.policy.timeout, self.responder.respond(decision)).await {
                Ok(result) => result,
                Err(_) => Err(ResponderError::Timeout(self.policy.timeout.as_millis() as u64)),
            };
            match outcome {
                Ok(()) => return Ok(attempt),
                Err(e) if e.is_recoverable() && attempt <= self.policy.max_retries => {
                    let delay = self.policy.backoff * 2u32.saturating_pow(attempt - 1);
                    warn!("envío de {} falló ({}); reintento {}/{} en {:?}",
                          decision.transaction_id, e, attempt, self.policy.max_retries, delay);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
