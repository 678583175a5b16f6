use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use kinesia_core::models::{Observation, ObservationKind, Trace, VisitEvent, VisitSummary};

/// How repeated `audio.review` / `pdf.export` decisions for the same visit
/// reduce into the `is_audio_approved` / `is_pdf_signed` flags.
///
/// The backend does not order observations by timestamp, and a visit can
/// accumulate several review decisions across re-opened sessions. Product
/// has not settled which semantics are intended, so both are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewReduction {
    /// State as of the most recent decision, by observation timestamp.
    /// Deterministic regardless of trace or backend order.
    #[default]
    LatestWins,
    /// Any approval ever recorded counts: a monotonic OR, like the
    /// `has_*` flags.
    AnyApproval,
}

/// Reduces raw traces and observations into one [`VisitSummary`] per visit
/// id. Traces without a visit id cannot be attributed and are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    reduction: ReviewReduction,
}

struct VisitAccum {
    summary: VisitSummary,
    audio_decided_at: Option<jiff::Timestamp>,
    pdf_decided_at: Option<jiff::Timestamp>,
}

impl Aggregator {
    pub fn new(reduction: ReviewReduction) -> Self {
        Aggregator { reduction }
    }

    /// One pass over the fetched events. The returned map is keyed by
    /// visit id; `BTreeMap` keeps iteration deterministic so an unchanged
    /// input set always produces an identical output set.
    pub fn aggregate(
        &self,
        traces: &[Trace],
        observations: &HashMap<String, Vec<Observation>>,
    ) -> BTreeMap<String, VisitSummary> {
        let mut visits: BTreeMap<String, VisitAccum> = BTreeMap::new();

        for trace in traces {
            let Some(visit_id) = trace.visit_id.as_deref() else {
                debug!(trace_id = %trace.id, "trace has no visit attribution, skipping");
                continue;
            };

            let accum = visits.entry(visit_id.to_string()).or_insert_with(|| VisitAccum {
                summary: VisitSummary::empty(visit_id, trace.effective_date()),
                audio_decided_at: None,
                pdf_decided_at: None,
            });

            // First attribution seen wins; re-opened sessions never
            // overwrite it.
            if accum.summary.patient_id.is_none() {
                accum.summary.patient_id = trace.patient_id.clone();
            }
            if accum.summary.professional_id.is_none() {
                accum.summary.professional_id = trace.professional_id.clone();
            }

            for obs in observations.get(&trace.id).map(Vec::as_slice).unwrap_or(&[]) {
                self.apply(accum, obs);
            }
        }

        visits
            .into_iter()
            .map(|(id, accum)| (id, accum.summary))
            .collect()
    }

    fn apply(&self, accum: &mut VisitAccum, obs: &Observation) {
        match obs.kind {
            ObservationKind::AudioReview => {
                accum.summary.has_audio_review = true;
                let approved = obs.metadata_flag("approved");
                accum.summary.is_audio_approved = self.reduce(
                    accum.summary.is_audio_approved,
                    approved,
                    &mut accum.audio_decided_at,
                    obs.timestamp,
                );
            }
            ObservationKind::PdfExport => {
                accum.summary.has_pdf_export = true;
                let signed = obs.metadata_flag("signed");
                accum.summary.is_pdf_signed = self.reduce(
                    accum.summary.is_pdf_signed,
                    signed,
                    &mut accum.pdf_decided_at,
                    obs.timestamp,
                );
            }
            ObservationKind::McpContextBuild => {
                accum.summary.has_mcp_context = true;
            }
            // form.update and unrecognized kinds only join the audit trail.
            ObservationKind::FormUpdate | ObservationKind::Unknown(_) => {}
        }

        accum.summary.events.push(VisitEvent {
            id: obs.id.clone(),
            kind: obs.kind.clone(),
            timestamp: obs.timestamp,
            details: obs.metadata.clone(),
        });
    }

    fn reduce(
        &self,
        current: bool,
        incoming: bool,
        decided_at: &mut Option<jiff::Timestamp>,
        at: jiff::Timestamp,
    ) -> bool {
        match self.reduction {
            ReviewReduction::LatestWins => {
                if decided_at.is_none_or(|prev| at >= prev) {
                    *decided_at = Some(at);
                    incoming
                } else {
                    current
                }
            }
            ReviewReduction::AnyApproval => current || incoming,
        }
    }
}
