//! Diagnostic sinks passed explicitly into discovery and merging.

use crate::error::Warning;

/// Receives non-fatal warnings and fatal error reports.
pub trait Diagnostics {
    fn warn(&mut self, warning: &Warning);
    fn error(&mut self, message: &str);
}

/// Forwards everything to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&mut self, warning: &Warning) {
        tracing::warn!(kind = warning.kind(), "{}", warning);
    }

    fn error(&mut self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Keeps every message in memory so callers can inspect them afterwards.
#[derive(Debug, Default, Clone)]
pub struct CollectingDiagnostics {
    pub warnings: Vec<Warning>,
    pub errors: Vec<String>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_warning(&self, kind: &str) -> bool {
        self.warnings.iter().any(|w| w.kind() == kind)
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn warn(&mut self, warning: &Warning) {
        self.warnings.push(warning.clone());
    }

    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}
