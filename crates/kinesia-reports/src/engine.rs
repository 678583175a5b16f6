use std::collections::HashMap;

use jiff::civil::Date;
use jiff::tz::TimeZone;
use tracing::warn;

use kinesia_audit::{classify_all, escalate_for_patient, Aggregator, ClassifierMode, PassEvent};
use kinesia_core::models::{Patient, Professional, RiskVisit, VisitSummary};
use kinesia_core::scope::Scope;
use kinesia_telemetry::{DataSource, EventGateway, ScopeData, SnapshotStore, TelemetryClient};

use crate::directory::DirectoryLookup;
use crate::error::ReportError;
use crate::filter::{apply_filters, RiskFilters};
use crate::generation::{Generation, PassToken};
use crate::group::{group_by_professional, group_by_year, ProfessionalGroup, YearGroup};

/// Output of one risk-worklist pass, grouped by professional.
#[derive(Debug, Clone)]
pub struct RiskReport {
    pub source: DataSource,
    pub groups: Vec<ProfessionalGroup>,
}

/// Output of one per-patient audit pass, grouped by calendar year.
#[derive(Debug, Clone)]
pub struct PatientHistory {
    pub source: DataSource,
    pub patient: Patient,
    pub years: Vec<YearGroup>,
}

/// The computation boundary the presentation layer calls. Each method is
/// one complete pass: fetch, aggregate, classify, filter, group. The
/// engine owns no persistent state and mutates nothing upstream.
pub struct AuditEngine<C, S, D> {
    gateway: EventGateway<C, S>,
    directory: D,
    aggregator: Aggregator,
    generation: Generation,
}

impl<C, S, D> AuditEngine<C, S, D>
where
    C: TelemetryClient + Clone,
    S: SnapshotStore,
    D: DirectoryLookup,
{
    pub fn new(gateway: EventGateway<C, S>, directory: D) -> Self {
        AuditEngine {
            gateway,
            directory,
            aggregator: Aggregator::default(),
            generation: Generation::new(),
        }
    }

    pub fn with_aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Start a pass, invalidating tokens from earlier passes. Callers
    /// racing scope changes should discard a result whose token went
    /// stale while the pass was in flight.
    pub fn begin_pass(&self) -> PassToken {
        self.generation.begin()
    }

    pub fn is_stale(&self, token: PassToken) -> bool {
        !self.generation.is_current(token)
    }

    /// The risk-monitoring worklist: clinic-wide visits with at least one
    /// omission, filtered and grouped by professional.
    pub async fn risk_visits(&self, filters: &RiskFilters) -> Result<RiskReport, ReportError> {
        self.risk_visits_at(filters, today_utc()).await
    }

    /// Same as [`risk_visits`](Self::risk_visits) with an explicit
    /// reference date for period resolution.
    pub async fn risk_visits_at(
        &self,
        filters: &RiskFilters,
        today: Date,
    ) -> Result<RiskReport, ReportError> {
        let fetch = self.gateway.fetch_scope(&Scope::Global).await;
        let summaries = self.summaries_from(fetch.data);
        let classified = classify_all(summaries, ClassifierMode::Worklist);

        let flagged_total = classified.len();
        let patients = self.resolve_patients(&classified).await;
        let professionals = self.resolve_professionals().await;

        let mut visits: Vec<RiskVisit> = classified
            .into_iter()
            .map(|v| {
                let patient_id = v
                    .summary
                    .patient_id
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string());
                let professional_id = v
                    .summary
                    .professional_id
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string());
                let patient = patients
                    .get(&patient_id)
                    .cloned()
                    .unwrap_or_else(|| Patient::unknown(&patient_id));
                let professional = professionals
                    .get(&professional_id)
                    .cloned()
                    .unwrap_or_else(|| Professional::unknown(&professional_id));
                let risk_level = escalate_for_patient(v.risk_level, &patient);

                RiskVisit {
                    id: v.summary.id,
                    date: v.summary.date,
                    patient_id,
                    patient_name: patient.name,
                    professional_id,
                    professional_name: professional.name,
                    validations: v.validations,
                    omission_count: v.omission_count,
                    risk_level,
                }
            })
            .collect();

        // Escalation can promote visits, so restore the classifier order.
        visits.sort_by(|a, b| a.risk_level.cmp(&b.risk_level).then(b.date.cmp(&a.date)));

        let visits = apply_filters(visits, filters, today)?;
        let surfaced = visits.len();
        let groups = group_by_professional(visits);

        PassEvent::new("global", fetch.source.as_str(), flagged_total, surfaced).emit();
        Ok(RiskReport {
            source: fetch.source,
            groups,
        })
    }

    /// The complete audit history for one patient, grouped by year.
    /// Fully-compliant visits are included; this is a record, not a
    /// worklist.
    pub async fn patient_history(&self, patient_id: &str) -> PatientHistory {
        let scope = Scope::patient(patient_id);
        let fetch = self.gateway.fetch_scope(&scope).await;
        let summaries = self.summaries_from(fetch.data);
        let visits = classify_all(summaries, ClassifierMode::FullHistory);

        let patient = match self.directory.list_patients(&[patient_id.to_string()]).await {
            Ok(mut patients) if !patients.is_empty() => patients.remove(0),
            Ok(_) => Patient::unknown(patient_id),
            Err(e) => {
                warn!(patient_id, error = %e, "patient lookup failed, using placeholder");
                Patient::unknown(patient_id)
            }
        };

        let total = visits.len();
        let years = group_by_year(visits);

        PassEvent::new(scope.to_string(), fetch.source.as_str(), total, total).emit();
        PatientHistory {
            source: fetch.source,
            patient,
            years,
        }
    }

    fn summaries_from(&self, data: ScopeData) -> Vec<VisitSummary> {
        match data {
            ScopeData::Events {
                traces,
                observations,
            } => self
                .aggregator
                .aggregate(&traces, &observations)
                .into_values()
                .collect(),
            ScopeData::Summaries(summaries) => summaries,
            ScopeData::Empty => Vec::new(),
        }
    }

    async fn resolve_patients(
        &self,
        classified: &[kinesia_core::models::AuditedVisit],
    ) -> HashMap<String, Patient> {
        let mut ids: Vec<String> = classified
            .iter()
            .filter_map(|v| v.summary.patient_id.clone())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return HashMap::new();
        }

        match self.directory.list_patients(&ids).await {
            Ok(patients) => patients.into_iter().map(|p| (p.id.clone(), p)).collect(),
            Err(e) => {
                warn!(error = %e, "patient lookup failed, using placeholders");
                HashMap::new()
            }
        }
    }

    async fn resolve_professionals(&self) -> HashMap<String, Professional> {
        match self.directory.list_professionals().await {
            Ok(professionals) => professionals
                .into_iter()
                .map(|p| (p.id.clone(), p))
                .collect(),
            Err(e) => {
                warn!(error = %e, "professional lookup failed, using placeholders");
                HashMap::new()
            }
        }
    }
}

fn today_utc() -> Date {
    jiff::Timestamp::now().to_zoned(TimeZone::UTC).date()
}
