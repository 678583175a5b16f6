use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A clinician as resolved by the directory lookup. Name resolution only;
/// the engine never writes these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Professional {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

/// A patient as resolved by the directory lookup, including the documented
/// clinical risk factors used for worklist escalation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub birth_date: Option<jiff::civil::Date>,
    pub email: Option<String>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
}

impl Patient {
    /// Placeholder record used when directory resolution fails; the visit
    /// still surfaces rather than being dropped.
    pub fn unknown(id: impl Into<String>) -> Self {
        Patient {
            id: id.into(),
            name: "Unknown patient".to_string(),
            birth_date: None,
            email: None,
            risk_factors: Vec::new(),
        }
    }
}

impl Professional {
    pub fn unknown(id: impl Into<String>) -> Self {
        Professional {
            id: id.into(),
            name: "Unknown professional".to_string(),
            email: None,
        }
    }
}
