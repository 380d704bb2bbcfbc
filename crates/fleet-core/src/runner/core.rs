//! Core BatchRunner implementation

use crate::constants::{DEFAULT_OP_TIMEOUT_SECS, DEFAULT_POOL_SIZE};
use crate::errors::RunnerError;
use crate::runner::BatchProgress;
use crate::sink::OutcomeSink;
use fleet_domain::{FleetError, Outcome, Plant};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use uuid::Uuid;

/// Resumen terminal de un lote.
///
/// `total == succeeded + failed` siempre: cada planta de la nómina termina
/// contada exactamente una vez, incluso si su tarea entró en pánico.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub batch_id: Uuid,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

/// Runner de lotes con fan-out acotado.
///
/// Ejecuta una misma operación sobre cada planta de la nómina con a lo sumo
/// `pool_size` operaciones en vuelo, aplica un presupuesto de tiempo por
/// operación y registra cada resultado en el sumidero a medida que las
/// tareas terminan. El fallo de una planta jamás detiene el lote; sólo un
/// error del sumidero lo aborta.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    pool_size: usize,
    op_timeout: Duration,
}

impl BatchRunner {
    /// Crea un runner con el pool y el timeout por defecto.
    pub fn new() -> Self {
        BatchRunner { pool_size: DEFAULT_POOL_SIZE,
                      op_timeout: Duration::from_secs(DEFAULT_OP_TIMEOUT_SECS) }
    }

    /// Fija la cantidad máxima de operaciones en vuelo.
    ///
    /// Un valor de 0 se corrige a 1 al ejecutar (un lote sin workers no
    /// puede avanzar).
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Fija el presupuesto de tiempo de cada operación individual.
    pub fn with_op_timeout(mut self, op_timeout: Duration) -> Self {
        self.op_timeout = op_timeout;
        self
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn op_timeout(&self) -> Duration {
        self.op_timeout
    }

    /// Ejecuta `operation` sobre cada planta de la nómina y registra los
    /// resultados en `sink` en el orden en que van terminando.
    ///
    /// La operación recibe la planta por valor y devuelve el futuro a
    /// ejecutar; el futuro corre en su propia tarea, de modo que un pánico
    /// queda confinado a esa planta y se registra como
    /// `FleetError::Internal`. El permiso del semáforo se adquiere antes del
    /// spawn, así nunca existen más de `pool_size` tareas a la vez.
    ///
    /// # Errores
    /// Retorna `RunnerError::Sink` si el sumidero rechaza una escritura; en
    /// ese caso las operaciones aún en vuelo se abortan al soltar el
    /// `JoinSet`.
    pub async fn run_batch<T, F, Fut, S>(&self,
                                         roster: Vec<Plant>,
                                         operation: F,
                                         sink: &mut S)
                                         -> Result<BatchSummary, RunnerError>
        where T: Send + 'static,
              F: Fn(Plant) -> Fut,
              Fut: Future<Output = Result<T, FleetError>> + Send + 'static,
              S: OutcomeSink<T>
    {
        let batch_id = Uuid::new_v4();
        let started = Instant::now();
        let total = roster.len();

        if roster.is_empty() {
            info!("run_batch:empty batch_id={batch_id}");
            return Ok(BatchSummary { batch_id, total: 0, succeeded: 0, failed: 0, elapsed: started.elapsed() });
        }

        let pool_size = if self.pool_size == 0 {
            warn!("run_batch:clamp batch_id={batch_id} pool_size=0 -> 1");
            1
        } else {
            self.pool_size
        };
        let op_timeout = self.op_timeout;
        let timeout_secs = op_timeout.as_secs();
        info!("run_batch:start batch_id={batch_id} total={total} pool={pool_size} timeout_s={timeout_secs}");

        let progress = Arc::new(BatchProgress::new(total));
        let semaphore = Arc::new(Semaphore::new(pool_size));
        let mut tasks: JoinSet<Outcome<T>> = JoinSet::new();
        let mut plants_by_task: HashMap<tokio::task::Id, Plant> = HashMap::with_capacity(total);

        for plant in roster {
            // El permiso viaja dentro de la tarea y se libera al terminar ella.
            let permit = Arc::clone(&semaphore).acquire_owned()
                                               .await
                                               .map_err(|_| RunnerError::Internal("semaphore closed".to_string()))?;
            let fut = operation(plant.clone());
            let task_plant = plant.clone();
            let task_progress = Arc::clone(&progress);
            let handle = tasks.spawn(async move {
                let _permit = permit;
                let result = match tokio::time::timeout(op_timeout, fut).await {
                    Ok(inner) => inner,
                    Err(_) => Err(FleetError::Timeout(timeout_secs)),
                };
                let done = task_progress.mark_done();
                match &result {
                    Ok(_) => debug!("[{done}/{}] {task_plant} ok", task_progress.total()),
                    Err(e) => warn!("[{done}/{}] {task_plant} failed: {e}", task_progress.total()),
                }
                Outcome::from((task_plant, result))
            });
            plants_by_task.insert(handle.id(), plant);
        }

        let mut succeeded = 0usize;
        let mut failed = 0usize;
        while let Some(joined) = tasks.join_next_with_id().await {
            let outcome = match joined {
                Ok((task_id, outcome)) => {
                    plants_by_task.remove(&task_id);
                    outcome
                }
                Err(join_err) => {
                    // La tarea murió sin producir Outcome: se reconstruye la
                    // planta desde el id de la tarea para no perder el conteo.
                    let plant = plants_by_task.remove(&join_err.id())
                                              .ok_or_else(|| {
                                                  RunnerError::Internal("joined task was never registered".to_string())
                                              })?;
                    let reason = if join_err.is_panic() {
                        "panic during operation".to_string()
                    } else {
                        "task cancelled".to_string()
                    };
                    progress.mark_done();
                    warn!("run_batch:crash batch_id={batch_id} plant={plant} reason={reason}");
                    Outcome::failure(plant, FleetError::Internal(reason))
                }
            };
            sink.record(&outcome)?;
            if outcome.is_success() {
                succeeded += 1;
            } else {
                failed += 1;
            }
        }

        let elapsed = started.elapsed();
        info!("run_batch:done batch_id={batch_id} ok={succeeded} failed={failed} elapsed={elapsed:?}");
        Ok(BatchSummary { batch_id, total, succeeded, failed, elapsed })
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new()
    }
}
