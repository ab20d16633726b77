// Host logger surface. Only error severity is used by the write path.

use std::fmt::Display;

pub trait Logger: Send + Sync {
    fn error(&self, err: &dyn Display);
}

/// Default logger: forwards to `tracing` at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn error(&self, err: &dyn Display) {
        tracing::error!(error = %err, "redis output");
    }
}
