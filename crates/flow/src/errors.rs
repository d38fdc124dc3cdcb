// Archivo: errors.rs
// Propósito: definir los errores del motor y del responder, y el alias
// Result<T> usado por las APIs del crate.
use crate::domain::FlowState;
use thiserror::Error;

/// Errores devueltos por un `Responder` al enviar la decisión.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponderError {
    /// El envío superó el tiempo máximo (en milisegundos).
    #[error("Tiempo de espera agotado tras {0} ms")]
    Timeout(u64),
    /// Fallo de red o de transporte antes de obtener respuesta.
    #[error("Error de transporte: {0}")]
    Transport(String),
    /// El servidor respondió con un estado no exitoso.
    #[error("Respuesta rechazada: {status} - {message}")]
    Rejected { status: u16, message: String },
}

impl ResponderError {
    /// Indica si merece la pena reintentar el envío.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ResponderError::Timeout(_) | ResponderError::Transport(_) => true,
            ResponderError::Rejected { status, .. } => *status >= 500,
        }
    }
}

/// Errores comunes del motor de flujos.
///
/// - `StepNotComplete`: el paso actual no cumple su predicado de completitud.
/// - `InvalidTransition`: la acción no es válida en el estado actual.
/// - `Terminated`: el flujo ya terminó.
/// - `SubmissionFailure`: el envío de la decisión falló; el flujo sigue en
///   `Submitting`.
/// - `Validation`: configuración inválida del motor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Paso no completado: {0}")]
    StepNotComplete(usize),
    #[error("Transición inválida desde {state}: {action}")]
    InvalidTransition { state: FlowState, action: &'static str },
    #[error("El flujo ya terminó")]
    Terminated,
    #[error("Error de envío: {0}")]
    SubmissionFailure(#[from] ResponderError),
    #[error("Error de validación: {0}")]
    Validation(String),
}

/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, FlowError>;
