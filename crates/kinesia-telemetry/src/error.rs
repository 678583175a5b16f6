use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("no snapshot for scope: {0}")]
    NotFound(String),

    #[error("snapshot unreadable: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}
