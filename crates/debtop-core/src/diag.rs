//! Diagnostics trait for dependency injection
//!
//! This trait allows core logic to report recovered problems and fatal
//! causes without being coupled to a specific logging backend. The CLI
//! injects a tracing-backed implementation; tests inject
//! [`NullDiagnostics`]. Diagnostic output never goes to stdout, so the
//! ranked report stays clean.

/// Sink for diagnostic messages emitted by pipeline components.
pub trait Diagnostics: Send + Sync {
    /// Report a recovered, per-line problem (bad encoding, malformed record).
    fn warning(&self, msg: &str);

    /// Report the cause of a fatal, classified failure.
    fn error(&self, msg: &str);
}

impl<T: Diagnostics + ?Sized> Diagnostics for &T {
    fn warning(&self, msg: &str) {
        (**self).warning(msg);
    }

    fn error(&self, msg: &str) {
        (**self).error(msg);
    }
}

/// A no-op sink for silent operations (e.g., testing).
#[derive(Debug, Clone, Copy)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn warning(&self, _: &str) {}
    fn error(&self, _: &str) {}
}
