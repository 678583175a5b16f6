use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use kinesia_core::models::{OmissionAxis, RiskVisit};

use crate::error::ReportError;
use crate::period::TimePeriod;

/// Scope filters for the risk worklist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskFilters {
    #[serde(default)]
    pub period: TimePeriod,
    /// Exact professional id. `None` or the literal `"all"` disables the
    /// filter.
    #[serde(default)]
    pub professional: Option<String>,
    /// A visit passes iff at least one selected axis failed. Empty means
    /// no filtering.
    #[serde(default)]
    pub omissions: Vec<OmissionAxis>,
}

impl RiskFilters {
    fn professional_id(&self) -> Option<&str> {
        match self.professional.as_deref() {
            None | Some("all") => None,
            other => other,
        }
    }
}

/// Apply period, professional, and omission-type filters. Never re-derives
/// validation state; only the already-classified visits are inspected.
pub fn apply_filters(
    visits: Vec<RiskVisit>,
    filters: &RiskFilters,
    today: Date,
) -> Result<Vec<RiskVisit>, ReportError> {
    let mut filtered = Vec::with_capacity(visits.len());
    for visit in visits {
        if !filters.period.contains(visit.date, today)? {
            continue;
        }
        if let Some(id) = filters.professional_id() {
            if visit.professional_id != id {
                continue;
            }
        }
        if !filters.omissions.is_empty()
            && !filters
                .omissions
                .iter()
                .any(|axis| !visit.validations.status(*axis).passed)
        {
            continue;
        }
        filtered.push(visit);
    }
    Ok(filtered)
}
