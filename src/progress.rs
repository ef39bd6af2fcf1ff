//! Progress reporting during reconciliation

use async_trait::async_trait;

/// Receives human-readable status lines while a run executes
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called for each status message
    async fn on_message(&self, message: &str);
}

/// Progress callback that discards everything
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_message(&self, _message: &str) {}
}
