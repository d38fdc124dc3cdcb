// Archivo: config.rs
// Propósito: configuración del cliente del Permission Hub leída del entorno
// (con soporte para `.env` vía dotenvy).
use crate::errors::{ClientError, Result};
use flow::SubmissionPolicy;
use log::debug;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_URL: &str = "PERMISSION_HUB_URL";
pub const ENV_TIMEOUT_MS: &str = "PERMISSION_HUB_TIMEOUT_MS";
pub const ENV_MAX_RETRIES: &str = "PERMISSION_HUB_MAX_RETRIES";
pub const ENV_BACKOFF_MS: &str = "PERMISSION_HUB_BACKOFF_MS";
pub const ENV_POLL_INTERVAL_MS: &str = "PERMISSION_HUB_POLL_INTERVAL_MS";
pub const ENV_PLAN: &str = "PERMISSION_HUB_PLAN";
pub const ENV_MOCK: &str = "PERMISSION_HUB_MOCK";

/// Configuración del cliente.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// URL base del servidor (p. ej. `http://localhost:8080`).
    pub base_url: String,
    pub timeout_ms: u64,
    pub max_retries: u32,
    pub backoff_ms: u64,
    pub poll_interval_ms: u64,
    /// Nombre del plan de pasos (`full`, `classic`, `overview`).
    pub plan: String,
    /// Usar el origen de ejemplo en lugar del servidor.
    pub mock: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: "http://localhost:8080".to_string(),
               timeout_ms: 15_000,
               max_retries: 1,
               backoff_ms: 500,
               poll_interval_ms: 1_000,
               plan: "full".to_string(),
               mock: false }
    }
}

impl ClientConfig {
    /// Carga `.env` (si existe) y lee la configuración del entorno.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda de
    /// variables. Las variables ausentes toman el valor por defecto.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
        where F: Fn(&str) -> Option<String>
    {
        let defaults = Self::default();
        let config = Self { base_url: lookup(ENV_URL).unwrap_or(defaults.base_url),
                            timeout_ms: parse_var(&lookup, ENV_TIMEOUT_MS, defaults.timeout_ms)?,
                            max_retries: parse_var(&lookup, ENV_MAX_RETRIES, defaults.max_retries)?,
                            backoff_ms: parse_var(&lookup, ENV_BACKOFF_MS, defaults.backoff_ms)?,
                            poll_interval_ms: parse_var(&lookup, ENV_POLL_INTERVAL_MS, defaults.poll_interval_ms)?,
                            plan: lookup(ENV_PLAN).map(|p| p.trim().to_lowercase()).unwrap_or(defaults.plan),
                            mock: parse_flag(&lookup, ENV_MOCK)? };
        if config.timeout_ms == 0 {
            return Err(ClientError::Config(format!("{} debe ser mayor que 0", ENV_TIMEOUT_MS)));
        }
        debug!("configuración cargada: {:?}", config);
        Ok(config)
    }

    /// Política de envío derivada de la configuración.
    pub fn submission_policy(&self) -> SubmissionPolicy {
        SubmissionPolicy { timeout: Duration::from_millis(self.timeout_ms),
                           max_retries: self.max_retries,
                           backoff: Duration::from_millis(self.backoff_ms) }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
    where F: Fn(&str) -> Option<String>,
          T: FromStr
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim()
                        .parse::<T>()
                        .map_err(|_| ClientError::Config(format!("{}: valor inválido '{}'", key, raw))),
    }
}

fn parse_flag<F>(lookup: &F, key: &str) -> Result<bool>
    where F: Fn(&str) -> Option<String>
{
    match lookup(key).map(|v| v.trim().to_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(ClientError::Config(format!("{}: valor inválido '{}'", key, v))),
        },
    }
}
