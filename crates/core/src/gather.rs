// Ordered fan-out/fan-in with per-branch failure isolation

use crate::error::{Error, Result};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::warn;

/// Default number of branches allowed in flight at once.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 8;

/// Run every future on its own task, at most `max_in_flight` at a time, and
/// return their results in input order.
///
/// A failing or panicking branch only affects its own slot. All branches are
/// awaited before this returns; none is cancelled.
pub async fn gather_ordered<I, F, T>(branches: I, max_in_flight: usize) -> Vec<Result<T>>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(max_in_flight.max(1)));

    let handles: Vec<_> = branches
        .into_iter()
        .map(|branch| {
            let semaphore = semaphore.clone();
            tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| Error::Internal(format!("Fan-out limiter closed: {}", e)))?;
                branch.await
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (index, handle) in handles.into_iter().enumerate() {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => {
                warn!(branch = index, error = %e, "Fan-out branch aborted");
                Err(Error::Internal(format!("Branch {} aborted: {}", index, e)))
            }
        };
        results.push(result);
    }
    results
}
