// source.rs
use crate::{DomainError, Transaction};
use async_trait::async_trait;

/// Origen de transacciones pendientes.
///
/// `Ok(None)` significa que no hay ninguna transacción pendiente ahora mismo;
/// un payload mal formado se reporta como `DomainError::DecodeFailure`.
#[async_trait]
pub trait TransactionSource: Send + Sync {
  async fn next_transaction(&self) -> Result<Option<Transaction>, DomainError>;
}
