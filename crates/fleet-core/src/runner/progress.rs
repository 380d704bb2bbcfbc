//! Contador de avance compartido entre los workers del lote.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Avance de un lote en curso.
///
/// Los workers lo incrementan al terminar cada operación; el hilo que drena
/// resultados (o cualquier observador) puede leerlo sin bloquear. El total es
/// fijo desde el arranque del lote.
#[derive(Debug)]
pub struct BatchProgress {
    total: usize,
    done: AtomicUsize,
}

impl BatchProgress {
    pub fn new(total: usize) -> Self {
        BatchProgress { total, done: AtomicUsize::new(0) }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn done(&self) -> usize {
        self.done.load(Ordering::Relaxed)
    }

    /// Marca una operación como terminada y devuelve el nuevo conteo.
    pub fn mark_done(&self) -> usize {
        self.done.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn is_complete(&self) -> bool {
        self.done() >= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn mark_done_counts_up_to_total() {
        let progress = BatchProgress::new(3);
        assert_eq!(progress.done(), 0);
        assert!(!progress.is_complete());
        assert_eq!(progress.mark_done(), 1);
        assert_eq!(progress.mark_done(), 2);
        assert_eq!(progress.mark_done(), 3);
        assert!(progress.is_complete());
    }

    #[test]
    fn mark_done_is_safe_across_threads() {
        let progress = Arc::new(BatchProgress::new(100));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let p = Arc::clone(&progress);
            handles.push(std::thread::spawn(move || {
                for _ in 0..25 {
                    p.mark_done();
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(progress.done(), 100);
        assert!(progress.is_complete());
    }
}
