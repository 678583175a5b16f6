use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The per-visit reduction of all observations across all traces sharing
/// one visit id. Exactly one summary exists per visit id per pass; the
/// `has_*` flags are a logical OR over contributing observations and are
/// never reset once true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VisitSummary {
    pub id: String,
    pub date: jiff::Timestamp,
    pub patient_id: Option<String>,
    pub professional_id: Option<String>,
    pub has_audio_review: bool,
    pub is_audio_approved: bool,
    pub has_pdf_export: bool,
    pub is_pdf_signed: bool,
    pub has_mcp_context: bool,
    /// Contributing events in the order received, kept for detail display.
    pub events: Vec<VisitEvent>,
}

impl VisitSummary {
    /// A fresh summary with all flags false, as produced for a trace with
    /// zero observations.
    pub fn empty(id: impl Into<String>, date: jiff::Timestamp) -> Self {
        VisitSummary {
            id: id.into(),
            date,
            patient_id: None,
            professional_id: None,
            has_audio_review: false,
            is_audio_approved: false,
            has_pdf_export: false,
            is_pdf_signed: false,
            has_mcp_context: false,
            events: Vec::new(),
        }
    }
}

/// One audit-trail entry on a visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VisitEvent {
    pub id: String,
    #[ts(type = "string")]
    pub kind: crate::models::ObservationKind,
    pub timestamp: jiff::Timestamp,
    pub details: Option<serde_json::Value>,
}
