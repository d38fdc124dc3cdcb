use thiserror::Error;

// Errores comunes del flujo de consentimiento.
//
// Centraliza los errores del motor (`FlowError`), del dominio
// (`DomainError`) y del cliente HTTP (`ClientError`), más los errores
// propios de la capa de workflow.
#[derive(Error, Debug)]
pub enum WorkflowError {
  /// Errores del motor de pasos (incluye `SubmissionFailure`).
  #[error("Error de flujo: {0}")]
  Flow(#[from] flow::errors::FlowError),

  /// Errores del dominio (p. ej. payload mal formado).
  #[error("Error de dominio: {0}")]
  Domain(#[from] consent_domain::DomainError),

  /// Errores de configuración o de red del cliente.
  #[error("Error de cliente: {0}")]
  Client(#[from] consent_client::ClientError),

  /// El item indicado no existe entre los items del paso actual.
  #[error("Item desconocido: {0}")]
  UnknownItem(String),

  /// Errores de validacion local (índices fuera de rango, planes vacíos...).
  #[error("Error de validacion: {0}")]
  Validation(String),

  /// No hay ningún flujo activo en el coordinador.
  #[error("No hay ningún flujo activo")]
  NoActiveFlow,
}

impl WorkflowError {
  /// Verdadero si el error es un envío fallido que admite reintento manual.
  pub fn is_submission_failure(&self) -> bool {
    matches!(self, WorkflowError::Flow(flow::FlowError::SubmissionFailure(_)))
  }
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
