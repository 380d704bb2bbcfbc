//! Constantes del runner de lotes.
//!
//! Este módulo agrupa los valores por defecto que gobiernan el fan-out:
//! cuántas plantas se atienden en paralelo y cuánto tiempo puede tardar una
//! operación antes de darse por vencida. Ambos son sobreescribibles por
//! configuración; estos valores sólo aplican cuando nadie dice lo contrario.

/// Cantidad máxima de operaciones en vuelo por defecto. Dimensionada para
/// flotas de decenas de plantas sin saturar la red de gestión.
pub const DEFAULT_POOL_SIZE: usize = 10;

/// Presupuesto de tiempo por operación, en segundos. Al vencerse, la planta
/// queda registrada con un fallo de timeout y el lote continúa.
pub const DEFAULT_OP_TIMEOUT_SECS: u64 = 30;
