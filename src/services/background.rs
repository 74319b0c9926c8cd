//! Detached background work that outlives the request that started it

use std::{future::Future, time::Duration};

use tokio_util::task::TaskTracker;

use crate::error::AppResult;

/// Pool of fire-and-forget tasks.
///
/// Tasks run on the tokio runtime, outside any request's timeout or
/// cancellation. A failed task is logged and otherwise dropped.
#[derive(Clone, Default)]
pub struct BackgroundTasks {
    tracker: TaskTracker,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` detached, bounded by its own `timeout`.
    pub fn spawn<F>(&self, name: String, timeout: Duration, task: F)
    where
        F: Future<Output = AppResult<()>> + Send + 'static,
    {
        self.tracker.spawn(async move {
            match tokio::time::timeout(timeout, task).await {
                Ok(Ok(())) => tracing::debug!(task = %name, "background task completed"),
                Ok(Err(e)) => tracing::error!(task = %name, error = %e, "background task failed"),
                Err(_) => tracing::error!(
                    task = %name,
                    timeout_ms = timeout.as_millis() as u64,
                    "background task timed out"
                ),
            }
        });
    }

    /// Number of tasks still running
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// Wait until every task spawned so far has finished. New tasks may still be
    /// spawned afterwards, so this must not race with [`BackgroundTasks::shutdown`].
    #[cfg(test)]
    pub(crate) async fn wait_idle(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }

    /// Close the pool and give pending tasks up to `grace` to finish.
    /// Returns false when tasks were still running at the deadline.
    pub async fn shutdown(&self, grace: Duration) -> bool {
        self.tracker.close();
        let pending = self.tracker.len();
        if pending > 0 {
            tracing::info!("Waiting for {} background task(s) to finish", pending);
        }
        tokio::time::timeout(grace, self.tracker.wait()).await.is_ok()
    }
}
