//! Errores propios del runner (los fallos por planta viven en `fleet-domain`).

use crate::sink::SinkError;
use thiserror::Error;

/// Error que aborta el lote completo.
///
/// Un fallo de planta nunca llega aquí: se registra como `Outcome::Failure`
/// y el lote sigue. Estas variantes cubren lo que sí es fatal: el sumidero
/// de resultados dejó de aceptar escrituras, o el propio runner rompió una
/// invariante interna.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("sink rejected outcome: {0}")]
    Sink(#[from] SinkError),
    #[error("internal: {0}")]
    Internal(String),
}
