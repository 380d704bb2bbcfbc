// outcome.rs
use crate::{FleetError, Plant};

/// Valor centinela que los artefactos escriben en lugar de datos reales
/// cuando la operación sobre una planta falló.
pub const ERROR_MARKER: &str = "ERROR";

/// Resultado terminal de una operación sobre una planta.
///
/// Cada planta del lote produce exactamente un `Outcome`: o bien la carga
/// útil de la operación, o bien el error que la abortó. El fallo de una
/// planta nunca se propaga como fallo del lote.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    Success { plant: Plant, payload: T },
    Failure { plant: Plant, error: FleetError },
}

impl<T> Outcome<T> {
    pub fn success(plant: Plant, payload: T) -> Self {
        Outcome::Success { plant, payload }
    }

    pub fn failure(plant: Plant, error: FleetError) -> Self {
        Outcome::Failure { plant, error }
    }

    /// Planta a la que pertenece este resultado, sea éxito o fallo.
    pub fn plant(&self) -> &Plant {
        match self {
            Outcome::Success { plant, .. } => plant,
            Outcome::Failure { plant, .. } => plant,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure { .. })
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Outcome::Success { payload, .. } => Some(payload),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&FleetError> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Failure { error, .. } => Some(error),
        }
    }

    /// Convierte la carga útil preservando planta y error.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success { plant, payload } => Outcome::Success { plant, payload: f(payload) },
            Outcome::Failure { plant, error } => Outcome::Failure { plant, error },
        }
    }
}

impl<T> From<(Plant, Result<T, FleetError>)> for Outcome<T> {
    fn from((plant, result): (Plant, Result<T, FleetError>)) -> Self {
        match result {
            Ok(payload) => Outcome::Success { plant, payload },
            Err(error) => Outcome::Failure { plant, error },
        }
    }
}
