use serde::{Deserialize, Serialize};

/// One typed occurrence within a trace.
///
/// Observations arrive in the order the backend returns them, which is not
/// guaranteed to be timestamp order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub id: String,
    pub kind: ObservationKind,
    pub timestamp: jiff::Timestamp,
    /// Free-form backend metadata, e.g. `{"approved": true}` on an audio
    /// review or `{"signed": false}` on a PDF export.
    pub metadata: Option<serde_json::Value>,
}

impl Observation {
    /// Read a metadata field with JavaScript-style truthiness, since the
    /// backend does not guarantee the field is an actual boolean. Missing
    /// or null fields coerce to `false`.
    pub fn metadata_flag(&self, field: &str) -> bool {
        let Some(value) = self.metadata.as_ref().and_then(|m| m.get(field)) else {
            return false;
        };
        match value {
            serde_json::Value::Null => false,
            serde_json::Value::Bool(b) => *b,
            serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            serde_json::Value::String(s) => !s.is_empty(),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
        }
    }
}

/// Closed set of observation kinds the engine understands, plus a catch-all
/// for anything else the backend records. Unrecognized kinds are retained
/// in the visit event list but never affect derived flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ObservationKind {
    FormUpdate,
    AudioReview,
    PdfExport,
    McpContextBuild,
    Unknown(String),
}

impl ObservationKind {
    pub fn as_str(&self) -> &str {
        match self {
            ObservationKind::FormUpdate => "form.update",
            ObservationKind::AudioReview => "audio.review",
            ObservationKind::PdfExport => "pdf.export",
            ObservationKind::McpContextBuild => "mcp.context.build",
            ObservationKind::Unknown(s) => s,
        }
    }
}

impl From<String> for ObservationKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "form.update" => ObservationKind::FormUpdate,
            "audio.review" => ObservationKind::AudioReview,
            "pdf.export" => ObservationKind::PdfExport,
            "mcp.context.build" => ObservationKind::McpContextBuild,
            _ => ObservationKind::Unknown(s),
        }
    }
}

impl From<ObservationKind> for String {
    fn from(kind: ObservationKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for ObservationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
