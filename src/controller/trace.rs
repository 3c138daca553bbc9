//! Timing log around controller operations.

use std::future::Future;
use std::time::Instant;

/// Awaits `future`, logging its start and how long it took at debug level.
pub async fn traced<F>(label: &str, future: F) -> F::Output
where
    F: Future,
{
    log::debug!("{} started", label);
    let started = Instant::now();
    let output = future.await;
    log::debug!("{} finished in {}ms", label, started.elapsed().as_millis());
    output
}
