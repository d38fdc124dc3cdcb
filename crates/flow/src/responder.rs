// Archivo: responder.rs
// Propósito: definir el trait `Responder`, el contrato del colaborador externo
// que registra la decisión final (aceptar/rechazar) de un flujo.
use crate::domain::Decision;
use crate::errors::ResponderError;
use async_trait::async_trait;

/// Contrato mínimo del responder.
///
/// Se invoca una vez por transición terminal (más los reintentos que decida
/// `FlowService`). Las implementaciones no deben reintentar por su cuenta.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Envía la decisión. `Ok(())` significa que el servidor la registró.
    async fn respond(&self, decision: &Decision) -> Result<(), ResponderError>;
}
