//! Cooperative cancellation for tagging runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

/// Errors that abort a tagging run.
///
/// Cancellation is the only aborting condition; missing files, malformed
/// settings, and ambiguous PAD-US layouts are absorbed with a progress note.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaggingError {
    #[error("tagging run cancelled")]
    Cancelled,
}

/// Cloneable cancellation token checked at file and batch boundaries.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the run holding this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Abort the computation if cancellation was requested.
    pub fn checkpoint(&self) -> Result<(), TaggingError> {
        if self.is_cancelled() {
            Err(TaggingError::Cancelled)
        } else {
            Ok(())
        }
    }
}
