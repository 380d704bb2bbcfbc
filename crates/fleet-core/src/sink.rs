//! Sumideros de resultados y trait `OutcomeSink`.

use fleet_domain::Outcome;
use thiserror::Error;

/// Fallo del sumidero al registrar un resultado.
///
/// A diferencia de un fallo de planta, un error del sumidero aborta el lote:
/// si el artefacto no se puede escribir, seguir ejecutando operaciones sólo
/// produce resultados que nadie va a conservar.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("io: {0}")]
    Io(String),
    #[error("encode: {0}")]
    Encode(String),
}

impl From<std::io::Error> for SinkError {
    fn from(e: std::io::Error) -> Self {
        SinkError::Io(e.to_string())
    }
}

/// Destino de los resultados de un lote.
///
/// El runner es el único escritor: llama a `record` desde una sola tarea, en
/// el orden en que las operaciones van terminando. Las implementaciones no
/// necesitan sincronización propia.
pub trait OutcomeSink<T> {
    /// Registra un resultado (éxito o fallo) de una planta.
    fn record(&mut self, outcome: &Outcome<T>) -> Result<(), SinkError>;
}

/// Sumidero en memoria para tests y ejecuciones en seco.
pub struct MemorySink<T> {
    pub inner: Vec<Outcome<T>>,
}

impl<T> Default for MemorySink<T> {
    fn default() -> Self {
        Self { inner: Vec::new() }
    }
}

impl<T> MemorySink<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcomes(&self) -> &[Outcome<T>] {
        &self.inner
    }

    pub fn successes(&self) -> usize {
        self.inner.iter().filter(|o| o.is_success()).count()
    }

    pub fn failures(&self) -> usize {
        self.inner.iter().filter(|o| o.is_failure()).count()
    }
}

impl<T: Clone> OutcomeSink<T> for MemorySink<T> {
    fn record(&mut self, outcome: &Outcome<T>) -> Result<(), SinkError> {
        self.inner.push(outcome.clone());
        Ok(())
    }
}
