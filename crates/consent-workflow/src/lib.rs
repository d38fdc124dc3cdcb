//! consent-workflow: flujo de consentimiento del Permission Hub
//!
//! Une el motor de pasos del crate `flow` con el dominio de transacciones
//! (`consent_domain`) y el cliente HTTP (`consent_client`):
//! - `step`: pasos, plantillas de pantalla, bloques de contenido y el
//!   seguimiento de aceptación de items.
//! - `renderer`: generación de pantallas como datos (`ScreenRenderer`).
//! - `engine`: `TransactionFlow`, la sesión sobre una transacción.
//! - `factory`: `FlowCoordinator` y `FlowFactory` para el wiring.

pub mod engine;
pub mod errors;
pub mod factory;
pub mod plan;
pub mod renderer;
pub mod step;

pub use engine::{Navigation, TransactionFlow};
pub use errors::WorkflowError;
pub use factory::{ConsentRuntime, FlowCoordinator, FlowFactory};
pub use plan::FlowPlan;
pub use renderer::{ContentRenderer, ScreenRenderer};
pub use step::{AcceptanceTracker, ContentBlock, FlowStep, NoticeKind, ScreenContent};
