// transaction.rs
use crate::{DomainError, ItemId, LineItem};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Forma del payload tal como lo entrega el servidor de notificaciones.
#[derive(Debug, Deserialize)]
struct WireTransaction {
  #[serde(rename = "transactionID")]
  transaction_id: String,
  #[serde(rename = "item")]
  items: Vec<WireItem>,
  #[serde(default)]
  title: String,
  #[serde(default, alias = "reason")]
  description: String,
  verification: Vec<String>,
  date: DateTime<FixedOffset>,
  #[serde(rename = "requesterName")]
  requester_name: String,
  #[serde(rename = "RequesterPublicKey", default)]
  requester_public_key: String,
  #[serde(default)]
  analysis: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct WireItem {
  #[serde(rename = "Item")]
  name: String,
  #[serde(rename = "Fields", default)]
  fields: Vec<String>,
}

/// Solicitud de consentimiento de un tercero.
///
/// Se decodifica una vez por sesión y es inmutable salvo la bandera de
/// aceptación de cada item.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
  transaction_id: String,
  title: String,
  description: String,
  date: DateTime<FixedOffset>,
  requester_name: String,
  requester_public_key: String,
  line_items: Vec<LineItem>,
  verification: Vec<String>,
  analysis: Vec<String>,
}

impl Transaction {
  /// Decodifica el payload JSON del servidor. Cualquier clave obligatoria
  /// ausente o con tipo incorrecto produce `DecodeFailure`.
  pub fn from_json(payload: &str) -> Result<Self, DomainError> {
    let wire: WireTransaction = serde_json::from_str(payload)?;
    Self::from_wire(wire)
  }

  pub fn from_slice(payload: &[u8]) -> Result<Self, DomainError> {
    let wire: WireTransaction = serde_json::from_slice(payload)?;
    Self::from_wire(wire)
  }

  fn from_wire(wire: WireTransaction) -> Result<Self, DomainError> {
    if wire.transaction_id.trim().is_empty() {
      return Err(DomainError::DecodeFailure("transactionID vacío".to_string()));
    }
    let line_items = wire.items.into_iter().map(|i| LineItem::new(i.name, i.fields)).collect();
    Ok(Self { transaction_id: wire.transaction_id,
              title: wire.title,
              description: wire.description,
              date: wire.date,
              requester_name: wire.requester_name,
              requester_public_key: wire.requester_public_key,
              line_items,
              verification: wire.verification,
              analysis: wire.analysis })
  }

  /// Construye una transacción sin pasar por JSON (pruebas y stubs).
  #[allow(clippy::too_many_arguments)]
  pub fn from_parts(transaction_id: &str,
                    title: &str,
                    description: &str,
                    date: DateTime<FixedOffset>,
                    requester_name: &str,
                    requester_public_key: &str,
                    line_items: Vec<LineItem>,
                    verification: Vec<String>,
                    analysis: Vec<String>)
                    -> Result<Self, DomainError> {
    if transaction_id.trim().is_empty() {
      return Err(DomainError::ValidationError("transaction_id no puede estar vacío".to_string()));
    }
    Ok(Self { transaction_id: transaction_id.to_string(),
              title: title.to_string(),
              description: description.to_string(),
              date,
              requester_name: requester_name.to_string(),
              requester_public_key: requester_public_key.to_string(),
              line_items,
              verification,
              analysis })
  }

  pub fn transaction_id(&self) -> &str {
    &self.transaction_id
  }

  pub fn title(&self) -> &str {
    &self.title
  }

  pub fn description(&self) -> &str {
    &self.description
  }

  pub fn date(&self) -> DateTime<FixedOffset> {
    self.date
  }

  pub fn requester_name(&self) -> &str {
    &self.requester_name
  }

  pub fn requester_public_key(&self) -> &str {
    &self.requester_public_key
  }

  pub fn line_items(&self) -> &[LineItem] {
    &self.line_items
  }

  /// Acceso mutable a los items. La longitud y el orden no pueden cambiar;
  /// sólo la aceptación de cada item.
  pub fn line_items_mut(&mut self) -> &mut [LineItem] {
    &mut self.line_items
  }

  pub fn verification(&self) -> &[String] {
    &self.verification
  }

  pub fn analysis(&self) -> &[String] {
    &self.analysis
  }

  pub fn item(&self, id: ItemId) -> Option<&LineItem> {
    self.line_items.iter().find(|i| i.id() == id)
  }

  /// Primer item con ese nombre.
  pub fn item_by_name(&self, name: &str) -> Option<&LineItem> {
    self.line_items.iter().find(|i| i.name() == name)
  }

  pub fn accepted_items(&self) -> impl Iterator<Item = &LineItem> {
    self.line_items.iter().filter(|i| i.is_accepted())
  }
}

impl fmt::Display for Transaction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f,
           "{} de {} ({} items)",
           self.transaction_id,
           self.requester_name,
           self.line_items.len())
  }
}
