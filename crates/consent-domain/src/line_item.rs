// line_item.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identificador estable de un item, asignado al decodificar la transacción.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
  pub fn new() -> Self {
    Self(Uuid::new_v4())
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl Default for ItemId {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for ItemId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Elemento de una transacción sobre el que el usuario da (o no) su
/// consentimiento. Sólo `accepted` es mutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
  id: ItemId,
  name: String,
  fields: Vec<String>,
  accepted: bool,
}

impl LineItem {
  pub fn new(name: impl Into<String>, fields: Vec<String>) -> Self {
    Self { id: ItemId::new(),
           name: name.into(),
           fields,
           accepted: false }
  }

  pub fn id(&self) -> ItemId {
    self.id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn fields(&self) -> &[String] {
    &self.fields
  }

  pub fn is_accepted(&self) -> bool {
    self.accepted
  }

  pub fn set_accepted(&mut self, accepted: bool) {
    self.accepted = accepted;
  }

  /// Campos unidos por ", " tal como se muestran bajo el nombre del item.
  pub fn fields_summary(&self) -> String {
    self.fields.join(", ")
  }

  /// Igualdad por nombre (búsquedas heredadas por nombre).
  pub fn same_name(&self, other: &LineItem) -> bool {
    self.name == other.name
  }
}

// La identidad de un item es su id, no su contenido.
impl PartialEq for LineItem {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for LineItem {}

impl fmt::Display for LineItem {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} [{}]", self.name, self.fields_summary())
  }
}
