//! fleet-core: motor de lotes fan-out con aislamiento por planta
pub mod constants;
pub mod errors;
pub mod runner;
pub mod sink;

pub use errors::RunnerError;
pub use runner::{BatchProgress, BatchRunner, BatchSummary};
pub use sink::{MemorySink, OutcomeSink, SinkError};
