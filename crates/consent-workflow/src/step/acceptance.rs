use crate::errors::{Result, WorkflowError};
use consent_domain::{ItemId, LineItem};
use log::debug;

/// Condición de paso de una lista de items: todos aceptados. Una lista vacía
/// la cumple.
pub fn gate(items: &[LineItem]) -> bool {
    items.iter().all(|i| i.is_accepted())
}

/// Seguimiento de la aceptación de los items de un paso.
///
/// Trabaja sobre un préstamo mutable de los items (los de la transacción en
/// la vista general, o los propios del paso de términos legales). La
/// condición se recalcula en cada mutación.
pub struct AcceptanceTracker<'a> {
    items: &'a mut [LineItem],
}

impl<'a> AcceptanceTracker<'a> {
    pub fn new(items: &'a mut [LineItem]) -> Self {
        Self { items }
    }

    /// Cambia la aceptación del item `id` y devuelve la condición
    /// recalculada. Un id desconocido devuelve `UnknownItem` sin tocar nada.
    pub fn set_accepted(&mut self, id: ItemId, accepted: bool) -> Result<bool> {
        let item = self.items
                       .iter_mut()
                       .find(|i| i.id() == id)
                       .ok_or_else(|| WorkflowError::UnknownItem(id.to_string()))?;
        item.set_accepted(accepted);
        debug!("item '{}' accepted={}", item.name(), accepted);
        Ok(self.all_accepted())
    }

    /// Igual que `set_accepted` pero buscando por nombre. Si varios items
    /// comparten nombre sólo cambia el primero.
    pub fn set_accepted_by_name(&mut self, name: &str, accepted: bool) -> Result<bool> {
        let id = self.items
                     .iter()
                     .find(|i| i.name() == name)
                     .map(|i| i.id())
                     .ok_or_else(|| WorkflowError::UnknownItem(name.to_string()))?;
        self.set_accepted(id, accepted)
    }

    pub fn all_accepted(&self) -> bool {
        gate(self.items)
    }

    pub fn accepted_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_accepted()).count()
    }

    pub fn items(&self) -> &[LineItem] {
        self.items
    }
}
