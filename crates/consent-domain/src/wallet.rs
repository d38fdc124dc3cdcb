// wallet.rs
use crate::{DomainError, Transaction};
use chrono::{DateTime, FixedOffset};
use dashmap::DashMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Entrada del monedero de permisos: resumen de una transacción aceptada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletEntry {
  pub transaction_id: String,
  pub title: String,
  pub subtitle: String,
  pub date: DateTime<FixedOffset>,
  /// SHA-256 (hex) sobre el id de la transacción y los nombres aceptados.
  pub consent_hash: String,
}

impl WalletEntry {
  pub fn from_transaction(transaction: &Transaction) -> Self {
    let accepted: Vec<&str> = transaction.accepted_items().map(|i| i.name()).collect();
    Self { transaction_id: transaction.transaction_id().to_string(),
           title: format!("Purchase at {}", transaction.requester_name()),
           subtitle: accepted.join(", "),
           date: transaction.date(),
           consent_hash: Self::consent_hash(transaction.transaction_id(), &accepted) }
  }

  fn consent_hash(transaction_id: &str, accepted: &[&str]) -> String {
    let mut names: Vec<&str> = accepted.to_vec();
    names.sort();
    let mut hasher = Sha256::new();
    hasher.update(transaction_id.as_bytes());
    for name in names {
      hasher.update(b"\n");
      hasher.update(name.as_bytes());
    }
    format!("{:x}", hasher.finalize())
  }
}

/// Almacén de entradas del monedero.
pub trait PermissionWallet: Send + Sync {
  /// Registra la entrada. Registrar de nuevo la misma entrada no tiene
  /// efecto; la misma transacción con otra huella es un error.
  fn record(&self, entry: WalletEntry) -> Result<(), DomainError>;

  fn get(&self, transaction_id: &str) -> Result<Option<WalletEntry>, DomainError>;

  /// Entradas ordenadas de la más reciente a la más antigua.
  fn list(&self) -> Result<Vec<WalletEntry>, DomainError>;

  fn len(&self) -> usize;

  fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Monedero en memoria del proceso.
#[derive(Debug, Default)]
pub struct InMemoryWallet {
  entries: DashMap<String, WalletEntry>,
}

impl InMemoryWallet {
  pub fn new() -> Self {
    Self::default()
  }
}

impl PermissionWallet for InMemoryWallet {
  fn record(&self, entry: WalletEntry) -> Result<(), DomainError> {
    if let Some(existing) = self.entries.get(&entry.transaction_id) {
      if existing.consent_hash == entry.consent_hash {
        debug!("wallet: {} ya registrada", entry.transaction_id);
        return Ok(());
      }
      return Err(DomainError::ValidationError(format!("la transacción {} ya está registrada con otro consentimiento",
                                                      entry.transaction_id)));
    }
    info!("wallet: registrada {} ({})", entry.transaction_id, entry.title);
    self.entries.insert(entry.transaction_id.clone(), entry);
    Ok(())
  }

  fn get(&self, transaction_id: &str) -> Result<Option<WalletEntry>, DomainError> {
    Ok(self.entries.get(transaction_id).map(|e| e.value().clone()))
  }

  fn list(&self) -> Result<Vec<WalletEntry>, DomainError> {
    let mut entries: Vec<WalletEntry> = self.entries.iter().map(|e| e.value().clone()).collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.transaction_id.cmp(&b.transaction_id)));
    Ok(entries)
  }

  fn len(&self) -> usize {
    self.entries.len()
  }
}
