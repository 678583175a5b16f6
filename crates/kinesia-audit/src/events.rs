use serde::Serialize;
use tracing::info;

/// A structured event describing one completed aggregation pass.
///
/// Emitted via `tracing` so passes show up in the application log stream
/// alongside the rest of the product's audit events; the telemetry backend
/// captures the underlying queries itself.
#[derive(Debug, Clone, Serialize)]
pub struct PassEvent {
    pub scope: String,
    pub source: String,
    pub visit_count: usize,
    pub surfaced_count: usize,
    pub details: Option<serde_json::Value>,
}

impl PassEvent {
    pub fn new(
        scope: impl Into<String>,
        source: impl Into<String>,
        visit_count: usize,
        surfaced_count: usize,
    ) -> Self {
        Self {
            scope: scope.into(),
            source: source.into(),
            visit_count,
            surfaced_count,
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this pass event via tracing.
    pub fn emit(&self) {
        info!(
            pass.scope = %self.scope,
            pass.source = %self.source,
            pass.visit_count = self.visit_count,
            pass.surfaced_count = self.surfaced_count,
            "aggregation pass"
        );
    }
}
