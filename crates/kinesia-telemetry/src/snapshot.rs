use std::path::PathBuf;

use kinesia_core::models::VisitSummary;
use kinesia_core::scope::Scope;

use crate::error::SnapshotError;

/// The local fallback source: pre-aggregated visit summaries, one JSON
/// document per scope key. Summaries from here bypass the aggregator and
/// go straight to classification.
pub trait SnapshotStore {
    fn fetch(&self, scope: &Scope) -> Result<Vec<VisitSummary>, SnapshotError>;
}

/// Snapshot store backed by a directory of scope-keyed JSON files
/// (`risky-visits.json`, `patient-visits-{id}.json`, ...).
#[derive(Debug, Clone)]
pub struct FsSnapshotStore {
    root: PathBuf,
}

impl FsSnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsSnapshotStore { root: root.into() }
    }
}

impl SnapshotStore for FsSnapshotStore {
    fn fetch(&self, scope: &Scope) -> Result<Vec<VisitSummary>, SnapshotError> {
        let path = self.root.join(scope.snapshot_file());
        if !path.exists() {
            return Err(SnapshotError::NotFound(scope.to_string()));
        }
        let contents = std::fs::read_to_string(&path)?;
        let summaries: Vec<VisitSummary> = serde_json::from_str(&contents)?;
        Ok(summaries)
    }
}
