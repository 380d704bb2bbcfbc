// error.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error terminal de una operación sobre una planta.
///
/// Los conectores clasifican cada fallo en una de estas variantes; el runner
/// añade `Timeout` cuando la operación agota su presupuesto de tiempo e
/// `Internal` cuando la tarea entera se cae (pánico). La variante nunca
/// decide el destino del lote: sólo queda registrada en el artefacto.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FleetError {
    /// El login web fue rechazado o la sesión no obtuvo cookie CSRF.
    #[error("autenticación rechazada: {0}")]
    Auth(String),

    /// Una llamada HTTP posterior al login falló o devolvió contenido inesperado.
    #[error("llamada fallida: {0}")]
    Call(String),

    /// No se pudo establecer conexión con la base de datos.
    #[error("conexión fallida: {0}")]
    Connect(String),

    /// La consulta SQL fue rechazada por el motor.
    #[error("consulta fallida: {0}")]
    Query(String),

    /// La operación superó el presupuesto de tiempo del runner.
    #[error("operación vencida tras {0} segundos")]
    Timeout(u64),

    /// Fallo interno: pánico de la tarea o invariante rota.
    #[error("error interno: {0}")]
    Internal(String),
}

impl FleetError {
    /// Etiqueta corta de la variante, útil para logs y métricas de lote.
    pub fn kind(&self) -> &'static str {
        match self {
            FleetError::Auth(_) => "auth",
            FleetError::Call(_) => "call",
            FleetError::Connect(_) => "connect",
            FleetError::Query(_) => "query",
            FleetError::Timeout(_) => "timeout",
            FleetError::Internal(_) => "internal",
        }
    }
}
