//! Cancellation scope for work started by a page.
//!
//! Each page view owns one [`ViewScope`]. Leaving the page cancels it, and
//! anything still running inside resolves to [`LabFinderError::Cancelled`]
//! instead of delivering a result to a page that is gone.

use std::future::Future;
use std::time::Duration;

use labfinder_core::LabFinderError;
use labfinder_core::error::Result;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    cancellation: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that can cancel this scope from elsewhere (e.g. Ctrl-C).
    pub fn token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Runs `work` until it finishes or the scope is cancelled.
    pub async fn run<F>(&self, work: F) -> Result<F::Output>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => {
                tracing::debug!("View work cancelled");
                Err(LabFinderError::cancelled("the page was closed"))
            }
            output = work => Ok(output),
        }
    }

    /// Waits `duration` inside the scope.
    pub async fn delay(&self, duration: Duration) -> Result<()> {
        if duration.is_zero() {
            return if self.is_cancelled() {
                Err(LabFinderError::cancelled("the page was closed"))
            } else {
                Ok(())
            };
        }
        self.run(tokio::time::sleep(duration)).await
    }
}
