// Archivo: errors.rs
// Propósito: errores del cliente HTTP y de configuración, con conversión a
// los errores de las capas de dominio y de flujo.
use consent_domain::DomainError;
use flow::ResponderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Error HTTP: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Configuración inválida: {0}")]
    Config(String),
    #[error("Respuesta del servidor {status}: {message}")]
    Api { status: u16, message: String },
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<ClientError> for DomainError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Domain(d) => d,
            other => DomainError::ExternalError(other.to_string()),
        }
    }
}

impl From<ClientError> for ResponderError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Api { status, message } => ResponderError::Rejected { status, message },
            other => ResponderError::Transport(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
