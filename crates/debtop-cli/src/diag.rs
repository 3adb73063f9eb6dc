//! Tracing-backed diagnostics sink.

use debtop_core::Diagnostics;

/// Routes component diagnostics through the process tracing subscriber,
/// which `main` points at stderr.
#[derive(Debug, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warning(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }
}
