use kinesia_core::models::{
    AuditedVisit, Patient, RiskLevel, ValidationStatus, Validations, VisitSummary,
};

/// Which visits a classification pass surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierMode {
    /// Risk worklist: only visits with at least one omission.
    Worklist,
    /// Per-patient audit history: every visit, compliant ones included.
    FullHistory,
}

/// Derive the four validation axes for a visit. The table is fixed:
///
/// | axis      | checked            | passed              |
/// |-----------|--------------------|---------------------|
/// | checklist | has_audio_review   | is_audio_approved   |
/// | export    | always             | has_pdf_export      |
/// | signature | has_pdf_export     | is_pdf_signed       |
/// | mcp       | always             | has_mcp_context     |
pub fn validations(summary: &VisitSummary) -> Validations {
    Validations {
        checklist: ValidationStatus {
            checked: summary.has_audio_review,
            passed: summary.is_audio_approved,
        },
        export: ValidationStatus {
            checked: true,
            passed: summary.has_pdf_export,
        },
        signature: ValidationStatus {
            checked: summary.has_pdf_export,
            passed: summary.is_pdf_signed,
        },
        mcp: ValidationStatus {
            checked: true,
            passed: summary.has_mcp_context,
        },
    }
}

/// Classify one visit summary.
pub fn classify(summary: VisitSummary) -> AuditedVisit {
    let validations = validations(&summary);
    let omission_count = validations.omission_count();
    AuditedVisit {
        summary,
        validations,
        omission_count,
        risk_level: RiskLevel::from_omission_count(omission_count),
    }
}

/// Classify a pass worth of summaries, apply the mode's surfacing rule,
/// and sort: high risk first, then visit date descending.
pub fn classify_all(
    summaries: impl IntoIterator<Item = VisitSummary>,
    mode: ClassifierMode,
) -> Vec<AuditedVisit> {
    let mut visits: Vec<AuditedVisit> = summaries
        .into_iter()
        .map(classify)
        .filter(|v| match mode {
            ClassifierMode::Worklist => v.omission_count > 0,
            ClassifierMode::FullHistory => true,
        })
        .collect();

    visits.sort_by(|a, b| {
        a.risk_level
            .cmp(&b.risk_level)
            .then(b.summary.date.cmp(&a.summary.date))
    });
    visits
}

/// Worklist escalation for patients with documented clinical risk factors:
/// a medium-risk visit is surfaced as high. The audit history reports the
/// unescalated level, since its purpose is a complete record rather than
/// a triage queue.
pub fn escalate_for_patient(level: RiskLevel, patient: &Patient) -> RiskLevel {
    if level == RiskLevel::Medium && !patient.risk_factors.is_empty() {
        RiskLevel::High
    } else {
        level
    }
}
