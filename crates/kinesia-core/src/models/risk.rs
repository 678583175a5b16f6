use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::VisitSummary;

/// Whether one validation axis was evaluable and whether it succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidationStatus {
    pub checked: bool,
    pub passed: bool,
}

/// The four fixed validation axes of a visit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Validations {
    pub checklist: ValidationStatus,
    pub export: ValidationStatus,
    pub signature: ValidationStatus,
    pub mcp: ValidationStatus,
}

impl Validations {
    pub fn status(&self, axis: OmissionAxis) -> ValidationStatus {
        match axis {
            OmissionAxis::Checklist => self.checklist,
            OmissionAxis::Export => self.export,
            OmissionAxis::Signature => self.signature,
            OmissionAxis::Mcp => self.mcp,
        }
    }

    /// Number of axes with `passed = false`, independent of `checked`.
    pub fn omission_count(&self) -> usize {
        OmissionAxis::ALL
            .iter()
            .filter(|axis| !self.status(**axis).passed)
            .count()
    }
}

/// A validation axis that can fail for a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OmissionAxis {
    Checklist,
    Export,
    Signature,
    Mcp,
}

impl OmissionAxis {
    pub const ALL: [OmissionAxis; 4] = [
        OmissionAxis::Checklist,
        OmissionAxis::Export,
        OmissionAxis::Signature,
        OmissionAxis::Mcp,
    ];
}

/// Three-tier classification derived from the omission count.
///
/// Declaration order doubles as sort order: high-risk visits sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Fixed thresholds: 0 omissions → low, 1–2 → medium, 3+ → high.
    pub fn from_omission_count(count: usize) -> Self {
        match count {
            0 => RiskLevel::Low,
            1 | 2 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }
}

/// A classified visit with resolved display names, as surfaced on the
/// risk-monitoring worklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskVisit {
    pub id: String,
    pub date: jiff::Timestamp,
    pub patient_id: String,
    pub patient_name: String,
    pub professional_id: String,
    pub professional_name: String,
    pub validations: Validations,
    pub omission_count: usize,
    pub risk_level: RiskLevel,
}

/// A classified visit in the per-patient audit history. Unlike the
/// worklist, fully-compliant visits are included here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuditedVisit {
    pub summary: VisitSummary,
    pub validations: Validations,
    pub omission_count: usize,
    pub risk_level: RiskLevel,
}
