// Archivo: domain.rs
// Propósito: tipos del dominio del motor de pasos. Son valores pequeños y
// copiables que las capas superiores (workflow, UI) interpretan.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Estado del motor.
///
/// - `AtStep(i)`: el usuario está en el paso `i` (0-based, `i < N`).
/// - `Submitting { accepted }`: la decisión final está pendiente de envío.
/// - `Finished { accepted }`: la decisión fue registrada; estado terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowState {
    AtStep(usize),
    Submitting { accepted: bool },
    Finished { accepted: bool },
}

impl FlowState {
    /// Indica si el estado es terminal (no admite más transiciones).
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowState::Finished { .. })
    }

    /// Índice del paso actual, si el motor está en un paso.
    pub fn step_index(&self) -> Option<usize> {
        match self {
            FlowState::AtStep(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowState::AtStep(i) => write!(f, "at_step({})", i),
            FlowState::Submitting { accepted } => write!(f, "submitting(accepted={})", accepted),
            FlowState::Finished { accepted } => write!(f, "finished(accepted={})", accepted),
        }
    }
}

/// Resultado de una transición exitosa del motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// El cursor se movió al paso indicado.
    Moved(usize),
    /// El motor entró en `Submitting`; hay que enviar la decisión.
    Submit { accepted: bool },
}

/// Decisión final que se envía al responder.
///
/// Se serializa con las claves que espera el servidor:
/// `{"transactionID": "...", "accepted": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    #[serde(rename = "transactionID")]
    pub transaction_id: String,
    pub accepted: bool,
}

impl Decision {
    pub fn new(transaction_id: impl Into<String>, accepted: bool) -> Self {
        Self { transaction_id: transaction_id.into(), accepted }
    }
}

/// Comprobante de un envío exitoso.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub decision: Decision,
    /// Intentos realizados (1 si no hubo reintento).
    pub attempts: u32,
    pub submitted_at: DateTime<Utc>,
}

/// Intención de navegación devuelta al llamador en lugar de difundir eventos.
///
/// `C` es la descripción de pantalla que produce la capa superior.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationIntent<C> {
    /// Mostrar la pantalla del siguiente paso.
    Push(C),
    /// Mostrar una pantalla de detalle sin mover el cursor.
    PushDetail(C),
    /// Cerrar el flujo tras registrar la decisión.
    Dismiss { accepted: bool },
    /// Sustituir el flujo activo por uno nuevo.
    Replace(C),
}

impl<C> NavigationIntent<C> {
    /// Pantalla asociada a la intención, si la hay.
    pub fn screen(&self) -> Option<&C> {
        match self {
            NavigationIntent::Push(c) | NavigationIntent::PushDetail(c) | NavigationIntent::Replace(c) => Some(c),
            NavigationIntent::Dismiss { .. } => None,
        }
    }
}
