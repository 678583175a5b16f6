use kinesia_core::models::{Observation, Trace};
use kinesia_core::scope::Scope;

use crate::error::TelemetryError;

/// Per-pass fetch limits. Defaults match the product's historical query
/// sizes against the hosted backend.
#[derive(Debug, Clone, Copy)]
pub struct FetchLimits {
    pub traces: usize,
    pub observations: usize,
}

impl Default for FetchLimits {
    fn default() -> Self {
        FetchLimits {
            traces: 500,
            observations: 100,
        }
    }
}

/// The injected telemetry backend client.
///
/// Implementations wrap the hosted tracing service; scope and credentials
/// are plain construction-time arguments, never ambient process state.
/// The `Send + Sync + 'static` bounds let the gateway fan observation
/// fetches out across tasks.
pub trait TelemetryClient: Send + Sync + 'static {
    /// List traces matching a scope, newest first, up to `limit`.
    fn list_traces(
        &self,
        scope: &Scope,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Trace>, TelemetryError>> + Send;

    /// List the observations recorded under one trace, in backend order
    /// (not guaranteed to be timestamp order).
    fn list_observations(
        &self,
        trace_id: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Observation>, TelemetryError>> + Send;
}
