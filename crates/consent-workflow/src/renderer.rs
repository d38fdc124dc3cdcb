// Archivo: renderer.rs
// Propósito: construir la descripción de cada pantalla (lista ordenada de
// bloques) a partir del paso, la transacción y las respuestas del usuario.
use crate::step::{template, ContentBlock, FlowInputs, FlowStep, NoticeKind, ScreenContent, StepInputs, TemplateBlock};
use consent_domain::Transaction;

/// Contrato del generador de pantallas. La salida es una función pura de sus
/// argumentos.
pub trait ScreenRenderer: Send + Sync {
    fn render(&self, step: FlowStep, transaction: &Transaction, inputs: &FlowInputs) -> ScreenContent;

    /// Pantalla de detalle de un aviso: las notas de análisis para el aviso
    /// de advertencia, las fuentes de verificación para el de verificación.
    fn render_notice(&self, kind: NoticeKind, transaction: &Transaction) -> ScreenContent;
}

/// Generador por defecto, guiado por las plantillas de `step::template`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentRenderer;

impl ContentRenderer {
    pub fn new() -> Self {
        Self
    }

    fn summary(transaction: &Transaction, inputs: &FlowInputs, blocks: &mut Vec<ContentBlock>) {
        blocks.extend(transaction.accepted_items().map(ContentBlock::from_line_item));
        for (step, step_inputs) in inputs {
            let answers = step_inputs.answers();
            if answers.is_empty() {
                continue;
            }
            let description = answers.iter().map(|(k, v)| format!("{}: {}", k, v)).collect::<Vec<_>>().join(", ");
            blocks.push(ContentBlock::Description { date: None,
                                                    title: step.title().unwrap_or(step.as_str()).to_string(),
                                                    description });
        }
    }
}

impl ScreenRenderer for ContentRenderer {
    fn render(&self, step: FlowStep, transaction: &Transaction, inputs: &FlowInputs) -> ScreenContent {
        let template = template(step);
        let defaults;
        let step_inputs = match inputs.get(&step) {
            Some(i) => i,
            None => {
                defaults = StepInputs::from_template(template);
                &defaults
            }
        };

        let mut blocks = Vec::new();
        for block in &template.blocks {
            match block {
                TemplateBlock::Notice(kind, text) => {
                    blocks.push(ContentBlock::Notification { kind: *kind, text: text.to_string() })
                }
                TemplateBlock::Description { title, text } => {
                    blocks.push(ContentBlock::Description { date: Some(transaction.date()),
                                                            title: title.unwrap_or(transaction.title()).to_string(),
                                                            description: text.unwrap_or(transaction.description())
                                                                             .to_string() })
                }
                TemplateBlock::Plugin(image, text) => {
                    blocks.push(ContentBlock::Plugin { image: image.map(|s| s.to_string()), text: text.to_string() })
                }
                TemplateBlock::TransactionItems => {
                    blocks.extend(transaction.line_items().iter().map(ContentBlock::from_line_item))
                }
                TemplateBlock::OwnItems => blocks.extend(step_inputs.items().iter().map(ContentBlock::from_line_item)),
                TemplateBlock::Disclosure(text) => {
                    blocks.push(ContentBlock::SelectionDisclosure { text: text.to_string() })
                }
                TemplateBlock::Selection => blocks.push(ContentBlock::Selection { options: step_inputs.options()
                                                                                                      .to_vec(),
                                                                                  selected: step_inputs.selection() }),
                TemplateBlock::Forms => {
                    for field in &template.forms {
                        let text = step_inputs.form().get(field.placeholder).cloned().unwrap_or_default();
                        blocks.push(ContentBlock::Form { placeholder: field.placeholder.to_string(),
                                                         text,
                                                         keyboard: field.keyboard });
                    }
                }
                TemplateBlock::Document(file_name) => {
                    blocks.push(ContentBlock::Document { file_name: file_name.to_string() })
                }
                TemplateBlock::Summary => Self::summary(transaction, inputs, &mut blocks),
            }
        }

        let title = match step {
            FlowStep::Overview => Some(transaction.requester_name().to_string()),
            other => other.title().map(|t| t.to_string()),
        };
        ScreenContent { step: Some(step), title, blocks }
    }

    fn render_notice(&self, kind: NoticeKind, transaction: &Transaction) -> ScreenContent {
        let (title, entries) = match kind {
            NoticeKind::Warning => ("Permission warning", transaction.analysis()),
            NoticeKind::Verification => ("Verification", transaction.verification()),
        };
        let blocks = entries.iter()
                            .map(|text| ContentBlock::Notification { kind, text: text.clone() })
                            .collect();
        ScreenContent { step: None, title: Some(title.to_string()), blocks }
    }
}
