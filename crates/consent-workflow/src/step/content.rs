use crate::step::FlowStep;
use chrono::{DateTime, FixedOffset};
use consent_domain::{ItemId, LineItem};
use serde::{Deserialize, Serialize};

/// Tipo de aviso mostrado en la cabecera de una pantalla.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Verification,
    Warning,
}

/// Teclado sugerido para un campo de formulario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardKind {
    #[default]
    Default,
    Email,
    NumbersAndPunctuation,
}

/// Bloque de contenido de una pantalla. Una pantalla es una lista ordenada
/// de bloques; la forma de dibujarlos queda fuera de este crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Notification {
        kind: NoticeKind,
        text: String,
    },
    Description {
        date: Option<DateTime<FixedOffset>>,
        title: String,
        description: String,
    },
    Plugin {
        image: Option<String>,
        text: String,
    },
    LineItem {
        id: ItemId,
        name: String,
        fields: Vec<String>,
        accepted: bool,
    },
    SelectionDisclosure {
        text: String,
    },
    Selection {
        options: Vec<String>,
        selected: Option<usize>,
    },
    Form {
        placeholder: String,
        text: String,
        keyboard: KeyboardKind,
    },
    Document {
        file_name: String,
    },
}

impl ContentBlock {
    pub fn from_line_item(item: &LineItem) -> Self {
        ContentBlock::LineItem { id: item.id(),
                                 name: item.name().to_string(),
                                 fields: item.fields().to_vec(),
                                 accepted: item.is_accepted() }
    }
}

/// Descripción de una pantalla: paso, título y bloques en orden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenContent {
    /// `None` para pantallas de detalle (avisos).
    pub step: Option<FlowStep>,
    pub title: Option<String>,
    pub blocks: Vec<ContentBlock>,
}

impl ScreenContent {
    /// Items (id, aceptado) mostrados en la pantalla, en orden.
    pub fn line_items(&self) -> Vec<(ItemId, bool)> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                ContentBlock::LineItem { id, accepted, .. } => Some((*id, *accepted)),
                _ => None,
            })
            .collect()
    }

    /// Textos de los avisos del tipo indicado.
    pub fn notices(&self, kind: NoticeKind) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                ContentBlock::Notification { kind: k, text } if *k == kind => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Pares (placeholder, texto) de los campos de formulario.
    pub fn forms(&self) -> Vec<(&str, &str)> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                ContentBlock::Form { placeholder, text, .. } => Some((placeholder.as_str(), text.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Opciones y selección del bloque de selección, si lo hay.
    pub fn selection(&self) -> Option<(&[String], Option<usize>)> {
        self.blocks.iter().find_map(|b| match b {
                              ContentBlock::Selection { options, selected } => Some((options.as_slice(), *selected)),
                              _ => None,
                          })
    }
}
