use crate::{DomainError, Transaction, TransactionSource};
use async_trait::async_trait;
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};

/// Payload de ejemplo con la misma forma que entrega el servidor.
pub const SAMPLE_TRANSACTION_JSON: &str = r#"{
  "transactionID": "b80db272b05b9ad007c6833dac68b95ca907594946b2da1929d1f8f95d973b5c",
  "item": [
    { "Item": "Access to your Personal Details", "Fields": ["Name", "Surname", "Date of birth", "Email", "BSN"] },
    { "Item": "Legal identity (passport)", "Fields": ["Number", "Expiration date", "Country of issue"] },
    { "Item": "Newsletter", "Fields": ["Email address for marketing purposes"] },
    { "Item": "Payment information", "Fields": ["IBAN number", "Bank name", "Payment details"] },
    { "Item": "Subscription contract 24 months", "Fields": ["Read and accept the terms"] }
  ],
  "title": "Provide permission for completing",
  "description": "T-mobile monthly plan(unlimited data), 65 euro, iPhone XR 256GB",
  "verification": ["digid.nl", "planet-blockchain", "kvk"],
  "date": "2019-04-13T15:51:57+02:00",
  "requesterName": "John Smith",
  "RequesterPublicKey": "69093eef7426963f2ef0f68fb73e355b7898ddb04a4fad769a96b41ffc824c1c",
  "analysis": ["personal data is GDPR protected data", "banking details is sensitive data"]
}"#;

pub struct DomainStubs;

impl DomainStubs {
    /// Transacción decodificada a partir de `SAMPLE_TRANSACTION_JSON`.
    pub fn sample_transaction() -> Result<Transaction, DomainError> {
        Transaction::from_json(SAMPLE_TRANSACTION_JSON)
    }
}

/// Origen de transacciones que sirve el payload de ejemplo.
///
/// Por defecto lo entrega una sola vez; con `repeating()` lo entrega en cada
/// consulta (cada vez con ids de item nuevos).
#[derive(Debug, Default)]
pub struct StubTransactionSource {
    served: AtomicBool,
    repeat: bool,
}

impl StubTransactionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repeating() -> Self {
        Self { served: AtomicBool::new(false), repeat: true }
    }
}

#[async_trait]
impl TransactionSource for StubTransactionSource {
    async fn next_transaction(&self) -> Result<Option<Transaction>, DomainError> {
        if !self.repeat && self.served.swap(true, Ordering::SeqCst) {
            debug!("StubTransactionSource: sin transacciones pendientes");
            return Ok(None);
        }
        DomainStubs::sample_transaction().map(Some)
    }
}
