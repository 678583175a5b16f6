use serde::{Deserialize, Serialize};

/// One recorded clinical session in the telemetry backend.
///
/// Correlation to a visit is via metadata and is optional; a trace without
/// a `visit_id` cannot be attributed and is skipped by the aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    pub id: String,
    pub visit_id: Option<String>,
    pub patient_id: Option<String>,
    pub professional_id: Option<String>,
    /// Explicit visit date from trace metadata. Takes precedence over
    /// `started_at` when present.
    pub visit_date: Option<jiff::Timestamp>,
    pub started_at: jiff::Timestamp,
}

impl Trace {
    /// The date this trace's visit is attributed to.
    pub fn effective_date(&self) -> jiff::Timestamp {
        self.visit_date.unwrap_or(self.started_at)
    }
}
