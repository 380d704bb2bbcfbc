//! Reintento con credenciales de respaldo.

use fleet_domain::FleetError;
use log::warn;
use std::future::Future;

/// Ejecuta `primary` y, sólo si falla, ejecuta `fallback` una única vez.
///
/// Cada constructor se invoca a lo sumo una vez, así el intento de respaldo
/// arma su conexión recién cuando hace falta. Si ambos fallan se propaga el
/// error del respaldo, que es el del último intento real.
pub async fn with_fallback<T, F1, F2, Fut1, Fut2>(primary: F1, fallback: F2) -> Result<T, FleetError>
    where F1: FnOnce() -> Fut1,
          Fut1: Future<Output = Result<T, FleetError>>,
          F2: FnOnce() -> Fut2,
          Fut2: Future<Output = Result<T, FleetError>>
{
    match primary().await {
        Ok(value) => Ok(value),
        Err(primary_err) => {
            warn!("primary attempt failed ({primary_err}), retrying with fallback credentials");
            fallback().await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn fallback_is_not_invoked_on_success() {
        let primary_calls = AtomicUsize::new(0);
        let fallback_calls = AtomicUsize::new(0);

        let result = with_fallback(|| async {
                                       primary_calls.fetch_add(1, Ordering::SeqCst);
                                       Ok::<u32, FleetError>(7)
                                   },
                                   || async {
                                       fallback_calls.fetch_add(1, Ordering::SeqCst);
                                       Ok::<u32, FleetError>(9)
                                   }).await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn fallback_runs_exactly_once_after_primary_failure() {
        let primary_calls = AtomicUsize::new(0);
        let fallback_calls = AtomicUsize::new(0);

        let result = with_fallback(|| async {
                                       primary_calls.fetch_add(1, Ordering::SeqCst);
                                       Err::<u32, _>(FleetError::Auth("denied".to_string()))
                                   },
                                   || async {
                                       fallback_calls.fetch_add(1, Ordering::SeqCst);
                                       Ok::<u32, FleetError>(9)
                                   }).await;

        assert_eq!(result.unwrap(), 9);
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn when_both_fail_the_fallback_error_wins() {
        let result: Result<u32, FleetError> =
            with_fallback(|| async { Err(FleetError::Auth("primary denied".to_string())) },
                          || async { Err(FleetError::Connect("fallback refused".to_string())) }).await;

        match result {
            Err(FleetError::Connect(detail)) => assert_eq!(detail, "fallback refused"),
            other => panic!("expected the fallback error, got {other:?}"),
        }
    }
}
