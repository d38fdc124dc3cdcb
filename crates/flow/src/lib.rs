//! Crate `flow`: máquina de estados para flujos secuenciales de pasos
//!
//! Este crate define los tipos del motor (`FlowState`, `Transition`,
//! `Decision`, `NavigationIntent`), el motor `FlowEngine` que mueve un cursor
//! sobre una lista ordenada de pasos, el contrato `Responder` con el que se
//! envía la decisión final y un servicio `FlowService` que aplica timeout y
//! reintentos al envío. También incluye implementaciones en memoria útiles
//! para pruebas (`RecordingResponder`).
//!
//! Diseño resumido:
//! - El cursor sólo avanza: `AtStep(i)` -> `AtStep(i + 1)` -> ... ->
//!   `Submitting` -> `Finished`.
//! - `advance` exige que el paso actual esté completo (`StepNotComplete`).
//! - `cancel` es válido desde cualquier estado no terminal y produce una
//!   decisión `accepted = false`.
//! - Un envío fallido deja el motor en `Submitting`; el reintento es manual.
//!
//! Ejemplo rápido:
//! ```rust
//! use flow::FlowEngine;
//! let mut engine = FlowEngine::new(2).unwrap();
//! engine.advance(true).unwrap();
//! assert_eq!(engine.cursor(), 1);
//! ```
pub mod domain;
pub mod engine;
pub mod errors;
pub mod responder;
pub mod service;
pub mod stubs;

pub use domain::*;
pub use engine::*;
pub use errors::*;
pub use responder::*;
pub use service::*;
pub use stubs::*;
