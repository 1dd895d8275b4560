use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Generation counter identifying one transition attempt. Events carrying a
/// stale id are dropped by the machine.
pub type AttemptId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavOptions {
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
    /// Run scroll handling when the transition commits.
    pub scroll: bool,
}

impl Default for NavOptions {
    fn default() -> Self {
        Self {
            replace: false,
            scroll: true,
        }
    }
}

/// One-shot cancellation flag for a transition attempt.
///
/// Propagate-only: the machine raises it, the render side may poll it to
/// abandon in-flight work. No payload, no acknowledgment.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Failure reported by a render callback. Never retried; the machine passes
/// it through to whoever pumped the event.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("render failed: {0}")]
pub struct RenderError(pub String);

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
