//! Ten-step progress reporter for [`crate::PipelineController::load`].
//!
//! Each stage of a build load advances the counter by one step. Stepping is a
//! cooperative yield point: it gives the async runtime a chance to schedule
//! other tasks and is where cancellation is observed.

use crate::{Error, Result};
use ngdp_cdn::CancellationToken;
use tracing::debug;

/// Total number of steps a full `load()` reports through.
pub const TOTAL_STEPS: usize = 10;

/// Callback invoked on every step: `(completed, total, label)`.
pub type ProgressCallback = Box<dyn FnMut(usize, usize, &str) + Send>;

pub struct ProgressReporter {
    token: CancellationToken,
    completed: usize,
    callback: Option<ProgressCallback>,
}

impl ProgressReporter {
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            completed: 0,
            callback: None,
        }
    }

    pub fn with_callback(mut self, callback: impl FnMut(usize, usize, &str) + Send + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Advances the counter by one step, yields, then checks cancellation.
    pub async fn step(&mut self, label: &str) -> Result<()> {
        self.completed += 1;
        debug!(step = self.completed, total = TOTAL_STEPS, label, "pipeline load progress");
        if let Some(cb) = self.callback.as_mut() {
            cb(self.completed, TOTAL_STEPS, label);
        }

        tokio::task::yield_now().await;

        if self.token.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(())
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    /// The token this reporter observes, for passing on to a sub-operation
    /// (e.g. host resolution) that should honor the same cancellation.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.token
    }
}
