use std::collections::HashMap;

use tracing::{debug, warn};

use kinesia_core::models::{Observation, Trace, VisitSummary};
use kinesia_core::scope::Scope;

use crate::client::{FetchLimits, TelemetryClient};
use crate::error::SnapshotError;
use crate::snapshot::SnapshotStore;

/// Which source produced the data for a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Primary telemetry backend.
    Telemetry,
    /// Local pre-aggregated snapshot.
    Snapshot,
    /// Both sources consulted, neither had data. Normal outcome.
    Empty,
    /// Primary errored and the fallback also failed outright. The only
    /// case the presentation layer surfaces as an error.
    Unavailable,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Telemetry => "telemetry",
            DataSource::Snapshot => "snapshot",
            DataSource::Empty => "empty",
            DataSource::Unavailable => "unavailable",
        }
    }
}

/// Raw material for one aggregation pass.
#[derive(Debug, Clone)]
pub enum ScopeData {
    /// Raw traces plus their observations, keyed by trace id. Goes through
    /// the aggregator.
    Events {
        traces: Vec<Trace>,
        observations: HashMap<String, Vec<Observation>>,
    },
    /// Pre-aggregated summaries from the snapshot store.
    Summaries(Vec<VisitSummary>),
    Empty,
}

#[derive(Debug, Clone)]
pub struct ScopeFetch {
    pub source: DataSource,
    pub data: ScopeData,
}

impl ScopeFetch {
    fn empty(source: DataSource) -> Self {
        ScopeFetch {
            source,
            data: ScopeData::Empty,
        }
    }
}

/// Retrieves raw telemetry for a scope, with exactly one fallback attempt
/// against the snapshot store. Source failures are logged here and turned
/// into explicit outcomes; they never propagate to the caller.
pub struct EventGateway<C, S> {
    client: C,
    snapshots: S,
    limits: FetchLimits,
}

/// How many observation queries run at once. The reduction is
/// commutative over trace order, so fanning out cannot change the output.
const OBSERVATION_FAN_OUT: usize = 8;

impl<C: TelemetryClient + Clone, S: SnapshotStore> EventGateway<C, S> {
    pub fn new(client: C, snapshots: S) -> Self {
        EventGateway {
            client,
            snapshots,
            limits: FetchLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: FetchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Fetch everything needed for one pass over `scope`.
    ///
    /// The fallback activates iff the primary returns zero traces or
    /// errors. The primary is never retried. Observation fetches fan out
    /// with bounded concurrency; a failed fetch degrades only that trace.
    pub async fn fetch_scope(&self, scope: &Scope) -> ScopeFetch {
        let primary_failed = match self.client.list_traces(scope, self.limits.traces).await {
            Ok(traces) if !traces.is_empty() => {
                let observations = self.fetch_observations(&traces).await;
                return ScopeFetch {
                    source: DataSource::Telemetry,
                    data: ScopeData::Events {
                        traces,
                        observations,
                    },
                };
            }
            Ok(_) => {
                debug!(%scope, "telemetry returned no traces, trying snapshot");
                false
            }
            Err(e) => {
                warn!(%scope, error = %e, "telemetry query failed, trying snapshot");
                true
            }
        };

        match self.snapshots.fetch(scope) {
            Ok(summaries) if !summaries.is_empty() => ScopeFetch {
                source: DataSource::Snapshot,
                data: ScopeData::Summaries(summaries),
            },
            Ok(_) => ScopeFetch::empty(DataSource::Empty),
            // A missing snapshot file is a normal "no data" outcome.
            Err(SnapshotError::NotFound(_)) => ScopeFetch::empty(DataSource::Empty),
            Err(e) => {
                warn!(%scope, error = %e, "snapshot fetch failed");
                if primary_failed {
                    ScopeFetch::empty(DataSource::Unavailable)
                } else {
                    ScopeFetch::empty(DataSource::Empty)
                }
            }
        }
    }

    /// Fetch observations for every trace with a bounded fan-out, merging
    /// into a map keyed by trace id so the result is independent of
    /// completion order.
    async fn fetch_observations(&self, traces: &[Trace]) -> HashMap<String, Vec<Observation>> {
        let mut observations = HashMap::with_capacity(traces.len());
        for chunk in traces.chunks(OBSERVATION_FAN_OUT) {
            let mut set = tokio::task::JoinSet::new();
            for trace in chunk {
                let client = self.client.clone();
                let trace_id = trace.id.clone();
                let limit = self.limits.observations;
                set.spawn(async move {
                    let result = client.list_observations(&trace_id, limit).await;
                    (trace_id, result)
                });
            }

            while let Some(joined) = set.join_next().await {
                match joined {
                    Ok((trace_id, Ok(list))) => {
                        observations.insert(trace_id, list);
                    }
                    // One bad trace must not blank the whole pass.
                    Ok((trace_id, Err(e))) => {
                        warn!(%trace_id, error = %e, "observation query failed, skipping trace events");
                    }
                    Err(e) => {
                        warn!(error = %e, "observation fetch task failed");
                    }
                }
            }
        }
        observations
    }
}
