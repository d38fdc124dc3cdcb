//! Crate `consent-client`: acceso HTTP al servidor del Permission Hub.
//!
//! - `ClientConfig`: configuración desde el entorno (`PERMISSION_HUB_*`).
//! - `HubClient`: implementa `TransactionSource` (consulta la transacción
//!   pendiente) y `flow::Responder` (envía la decisión).
//! - `TransactionPoller`: consulta periódica de cualquier origen.
pub mod config;
pub mod errors;
pub mod http;
pub mod poller;

pub use config::ClientConfig;
pub use errors::{ClientError, Result};
pub use http::HubClient;
pub use poller::TransactionPoller;
