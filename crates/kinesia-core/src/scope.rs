use serde::{Deserialize, Serialize};

/// The query key used against both the telemetry backend and the local
/// snapshot store. A scope restricts by patient, by professional, or not
/// at all (the global risk dashboard).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scope {
    Global,
    Patient { id: String },
    Professional { id: String },
}

impl Scope {
    pub fn patient(id: impl Into<String>) -> Self {
        Scope::Patient { id: id.into() }
    }

    pub fn professional(id: impl Into<String>) -> Self {
        Scope::Professional { id: id.into() }
    }

    /// File name of the pre-aggregated snapshot for this scope, one JSON
    /// document per scope key.
    pub fn snapshot_file(&self) -> String {
        match self {
            Scope::Global => "risky-visits.json".to_string(),
            Scope::Patient { id } => format!("patient-visits-{id}.json"),
            Scope::Professional { id } => format!("professional-visits-{id}.json"),
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Global => write!(f, "global"),
            Scope::Patient { id } => write!(f, "patient:{id}"),
            Scope::Professional { id } => write!(f, "professional:{id}"),
        }
    }
}
