//! One-shot news priming at process start.

use ainews_client::NewsCurator;
use tokio::task::JoinHandle;

/// Fetch and store news in the background.
///
/// Failures are logged and dropped; the server keeps serving either way.
pub fn spawn_prime(curator: NewsCurator) -> JoinHandle<()> {
    tokio::spawn(async move {
        match curator.refresh().await {
            Ok(batch) => tracing::info!(items = batch.len(), fetched_at = %batch.fetched_at, "startup news fetch complete"),
            Err(err) => tracing::warn!(error = %err, "startup news fetch failed"),
        }
    })
}
