// Archivo: stubs.rs
// Propósito: implementaciones en memoria para pruebas y wiring rápido.
//
// `RecordingResponder` guarda las decisiones recibidas y puede simular fallos
// y latencia. No realiza ninguna llamada de red.
use crate::domain::Decision;
use crate::errors::ResponderError;
use crate::responder::Responder;
use async_trait::async_trait;
use log::debug;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Responder en memoria.
///
/// - Cada llamada incrementa `calls()`.
/// - Si hay fallos encolados, la llamada consume el primero y falla.
/// - Si no, la decisión se registra y la llamada termina bien.
#[derive(Debug, Default)]
pub struct RecordingResponder {
    decisions: Mutex<Vec<Decision>>,
    failures: Mutex<VecDeque<ResponderError>>,
    calls: Mutex<usize>,
    delay: Option<Duration>,
}

impl RecordingResponder {
    /// Crea un responder que acepta todas las decisiones.
    pub fn new() -> Self {
        Self::default()
    }

    /// Crea un responder que falla con los errores dados (en orden) antes de
    /// empezar a aceptar decisiones.
    pub fn failing_with<I>(errors: I) -> Self
        where I: IntoIterator<Item = ResponderError>
    {
        Self { failures: Mutex::new(errors.into_iter().collect()), ..Self::default() }
    }

    /// Añade una latencia fija a cada llamada.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Encola un fallo adicional.
    pub fn push_failure(&self, error: ResponderError) {
        self.failures.lock().unwrap_or_else(|e| e.into_inner()).push_back(error);
    }

    /// Decisiones registradas con éxito.
    pub fn decisions(&self) -> Vec<Decision> {
        self.decisions.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Número total de llamadas, incluidas las fallidas.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn respond(&self, decision: &Decision) -> Result<(), ResponderError> {
        *self.calls.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.failures.lock().unwrap_or_else(|e| e.into_inner()).pop_front() {
            debug!("RecordingResponder: fallo simulado para {}: {}", decision.transaction_id, err);
            return Err(err);
        }
        self.decisions.lock().unwrap_or_else(|e| e.into_inner()).push(decision.clone());
        Ok(())
    }
}
