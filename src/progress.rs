//! Best-effort progress reporting.

use tracing::debug;

type ProgressFn = dyn Fn(&str) + Send + Sync;

/// Forwards progress messages to an optional caller-supplied sink.
///
/// Delivery is fire-and-forget: messages mirror to the log and the sink is
/// invoked inline, but nothing here blocks or fails the run.
pub struct ProgressReporter {
    sink: Option<Box<ProgressFn>>,
}

impl ProgressReporter {
    pub fn new<F>(sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self {
            sink: Some(Box::new(sink)),
        }
    }

    /// A reporter that only mirrors to the log.
    pub fn none() -> Self {
        Self { sink: None }
    }

    pub fn report(&self, message: &str) {
        debug!("{}", message);
        if let Some(sink) = &self.sink {
            sink(message);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::none()
    }
}
