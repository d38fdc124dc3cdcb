use crate::errors::{Result, WorkflowError};
use crate::step::{FlowStep, StepTemplate};
use consent_domain::LineItem;
use indexmap::IndexMap;

/// Respuestas del usuario en un paso: campos de formulario, opción elegida
/// e items propios del paso.
#[derive(Debug, Clone, Default)]
pub struct StepInputs {
    form: IndexMap<String, String>,
    options: Vec<String>,
    selection: Option<usize>,
    items: Vec<LineItem>,
}

/// Respuestas de todos los pasos de un flujo, en el orden del plan.
pub type FlowInputs = IndexMap<FlowStep, StepInputs>;

impl StepInputs {
    /// Estado inicial de un paso: campos con su valor precargado, sin
    /// selección e items propios sin aceptar.
    pub fn from_template(template: &StepTemplate) -> Self {
        Self { form: template.forms
                             .iter()
                             .map(|f| (f.placeholder.to_string(), f.prefill.to_string()))
                             .collect(),
               options: template.options.iter().map(|o| o.to_string()).collect(),
               selection: None,
               items: template.own_items
                              .iter()
                              .map(|(name, fields)| LineItem::new(*name, fields.iter().map(|f| f.to_string()).collect()))
                              .collect() }
    }

    pub fn form(&self) -> &IndexMap<String, String> {
        &self.form
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// Texto de la opción elegida.
    pub fn selected_option(&self) -> Option<&str> {
        self.selection.and_then(|i| self.options.get(i)).map(|s| s.as_str())
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [LineItem] {
        &mut self.items
    }

    /// Rellena el campo en la posición `index`.
    pub fn fill(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let count = self.form.len();
        let (_, value) = self.form
                             .get_index_mut(index)
                             .ok_or_else(|| WorkflowError::Validation(format!("campo {} fuera de rango (hay {})",
                                                                              index, count)))?;
        *value = text.into();
        Ok(())
    }

    /// Elige la opción en la posición `index`.
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.options.len() {
            return Err(WorkflowError::Validation(format!("opción {} fuera de rango (hay {})",
                                                         index,
                                                         self.options.len())));
        }
        self.selection = Some(index);
        Ok(())
    }

    /// Respuestas dadas en el paso, como pares (etiqueta, valor).
    pub fn answers(&self) -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = self.form
                                                 .iter()
                                                 .filter(|(_, v)| !v.trim().is_empty())
                                                 .map(|(k, v)| (k.clone(), v.clone()))
                                                 .collect();
        if let Some(option) = self.selected_option() {
            out.push(("Selected".to_string(), option.to_string()));
        }
        for item in self.items.iter().filter(|i| i.is_accepted()) {
            out.push((item.name().to_string(), "accepted".to_string()));
        }
        out
    }
}
