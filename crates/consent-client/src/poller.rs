// Archivo: poller.rs
// Propósito: consulta periódica de un `TransactionSource` hasta que llega una
// transacción.
use consent_domain::{DomainError, Transaction, TransactionSource};
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;

pub struct TransactionPoller<S>
    where S: TransactionSource + ?Sized
{
    source: Arc<S>,
    interval: Duration,
}

impl<S> TransactionPoller<S> where S: TransactionSource + ?Sized
{
    pub fn new(source: Arc<S>, interval: Duration) -> Self {
        Self { source, interval }
    }

    /// Consulta hasta `max_attempts` veces (sin límite si es `None`).
    ///
    /// - Devuelve la primera transacción recibida.
    /// - `Ok(None)` si se agotan los intentos.
    /// - Un payload mal formado (`DecodeFailure`) detiene la consulta; otros
    ///   errores se registran y se vuelve a intentar.
    pub async fn poll(&self, max_attempts: Option<u32>) -> Result<Option<Transaction>, DomainError> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.source.next_transaction().await {
                Ok(Some(tx)) => return Ok(Some(tx)),
                Ok(None) => debug!("poll {}: sin transacción", attempt),
                Err(e @ DomainError::DecodeFailure(_)) => return Err(e),
                Err(e) => warn!("poll {}: {}", attempt, e),
            }
            if max_attempts.map(|max| attempt >= max).unwrap_or(false) {
                return Ok(None);
            }
            tokio::time::sleep(self.interval).await;
        }
    }
}
