//! Configuración central de la aplicación.
//!
//! Carga variables de entorno (.env incluido) y expone un cargador por
//! sección: credenciales web, acceso a la base local, acceso al histórico
//! y parámetros del runner. Cada sección se pide por separado para que un
//! comando sólo exija las variables que de verdad usa.

use dotenvy::dotenv;
use fleet_core::constants::{DEFAULT_OP_TIMEOUT_SECS, DEFAULT_POOL_SIZE};
use fleet_domain::{LocalDbAccess, RemoteDbAccess, SqlCredentials, WebCredentials};
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Carga `.env` una sola vez; si el archivo no existe se ignora.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv();
});

/// Fuerza la carga temprana de `.env` (útil al inicio del binario).
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

/// Errores al leer la configuración.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("variable {0} no definida")]
    Missing(&'static str),
    #[error("variable {0} inválida: {1}")]
    Invalid(&'static str, String),
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    Lazy::force(&DOTENV_LOADED);
    env::var(key).map_err(|_| ConfigError::Missing(key))
}

fn parsed_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    Lazy::force(&DOTENV_LOADED);
    match env::var(key) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid(key, raw)),
        Err(_)  => Ok(default),
    }
}

/// Credenciales del portal web de las plantas (`FLEET_WEB_USER` /
/// `FLEET_WEB_PASSWORD`).
pub fn web_credentials() -> Result<WebCredentials, ConfigError> {
    Ok(WebCredentials::new(required("FLEET_WEB_USER")?,
                           required("FLEET_WEB_PASSWORD")?))
}

/// Acceso a la base local de cada planta (`FLEET_MYSQL_*`), con el par de
/// credenciales de respaldo incluido.
pub fn local_db_access() -> Result<LocalDbAccess, ConfigError> {
    let primary = SqlCredentials::new(required("FLEET_MYSQL_USER")?,
                                      required("FLEET_MYSQL_PASSWORD")?);
    let fallback = SqlCredentials::new(required("FLEET_MYSQL_FALLBACK_USER")?,
                                       required("FLEET_MYSQL_FALLBACK_PASSWORD")?);
    Ok(LocalDbAccess::new(primary,
                          fallback,
                          parsed_or("FLEET_MYSQL_PORT", 3306)?,
                          required("FLEET_MYSQL_DATABASE")?))
}

/// Acceso al histórico central (`FLEET_RDS_*`).
pub fn remote_db_access() -> Result<RemoteDbAccess, ConfigError> {
    let credentials = SqlCredentials::new(required("FLEET_RDS_USER")?,
                                          required("FLEET_RDS_PASSWORD")?);
    Ok(RemoteDbAccess::new(required("FLEET_RDS_HOST")?,
                           parsed_or("FLEET_RDS_PORT", 5432)?,
                           required("FLEET_RDS_DBNAME")?,
                           credentials))
}

/// Parámetros del runner de lotes; ambos admiten override por entorno.
#[derive(Debug, Clone)]
pub struct RunnerSettings {
    pub pool_size: usize,
    pub op_timeout: Duration,
}

pub fn runner_settings() -> Result<RunnerSettings, ConfigError> {
    Ok(RunnerSettings {
        pool_size: parsed_or("FLEET_WORKERS", DEFAULT_POOL_SIZE)?,
        op_timeout: Duration::from_secs(parsed_or("FLEET_TIMEOUT_SECS", DEFAULT_OP_TIMEOUT_SECS)?),
    })
}
