// Archivo: http.rs
// Propósito: cliente HTTP del Permission Hub. Consulta la transacción
// pendiente (`GET notification-get`) y envía la decisión (`POST reply-put`).
use crate::config::ClientConfig;
use crate::errors::{ClientError, Result};
use async_trait::async_trait;
use consent_domain::{DomainError, Transaction, TransactionSource};
use flow::{Decision, Responder, ResponderError};
use log::{debug, info, warn};
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;

const NOTIFICATION_PATH: &str = "notification-get";
const REPLY_PATH: &str = "reply-put";

/// Cliente del servidor de notificaciones.
pub struct HubClient {
    client: Client,
    base_url: Url,
    config: ClientConfig,
}

impl std::fmt::Debug for HubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubClient")
         .field("base_url", &self.base_url.as_str())
         .field("timeout_ms", &self.config.timeout_ms)
         .finish()
    }
}

impl HubClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url).map_err(|e| {
                                                           ClientError::Config(format!("URL base inválida '{}': {}",
                                                                                       config.base_url, e))
                                                       })?;
        // Las rutas se resuelven relativas a la base; sin '/' final se
        // perdería el último segmento.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder().timeout(Duration::from_millis(config.timeout_ms))
                                      .user_agent(format!("permission-hub/{}", env!("CARGO_PKG_VERSION")))
                                      .build()?;
        info!("HubClient creado para {} (timeout {} ms)", base_url, config.timeout_ms);
        Ok(Self { client, base_url, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Config(format!("URL inválida para {}: {}", path, e)))
    }

    /// Consulta la transacción pendiente.
    ///
    /// `Ok(None)` cuando no hay ninguna: respuesta `204`, o cuerpo vacío con
    /// `2xx` o con el `500` que devuelve el servidor cuando no tiene datos.
    pub async fn fetch_transaction(&self) -> Result<Option<Transaction>> {
        let url = self.endpoint(NOTIFICATION_PATH)?;
        debug!("consultando transacción pendiente en {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        let blank = body.iter().all(|b| b.is_ascii_whitespace());

        if status == StatusCode::NO_CONTENT
           || (blank && (status.is_success() || status == StatusCode::INTERNAL_SERVER_ERROR))
        {
            debug!("sin transacción pendiente (estado {})", status);
            return Ok(None);
        }
        if !status.is_success() {
            let message = String::from_utf8_lossy(&body).into_owned();
            warn!("consulta de transacción falló: {} - {}", status, message);
            return Err(ClientError::Api { status: status.as_u16(), message });
        }
        let transaction = Transaction::from_slice(&body)?;
        info!("transacción recibida: {}", transaction);
        Ok(Some(transaction))
    }

    /// Envía la decisión final. Cualquier estado no `2xx` es un error.
    pub async fn post_decision(&self, decision: &Decision) -> Result<()> {
        let url = self.endpoint(REPLY_PATH)?;
        debug!("enviando decisión {:?} a {}", decision, url);
        let response = self.client.post(url).json(decision).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        warn!("envío de decisión falló: {} - {}", status, message);
        Err(ClientError::Api { status: status.as_u16(), message })
    }
}

#[async_trait]
impl TransactionSource for HubClient {
    async fn next_transaction(&self) -> std::result::Result<Option<Transaction>, DomainError> {
        self.fetch_transaction().await.map_err(DomainError::from)
    }
}

#[async_trait]
impl Responder for HubClient {
    async fn respond(&self, decision: &Decision) -> std::result::Result<(), ResponderError> {
        self.post_decision(decision).await.map_err(|e| match e {
                                              ClientError::Http(ref err) if err.is_timeout() => {
                                                  ResponderError::Timeout(self.config.timeout_ms)
                                              }
                                              other => ResponderError::from(other),
                                          })
    }
}
