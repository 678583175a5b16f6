use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("date arithmetic error: {0}")]
    Date(#[from] jiff::Error),
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory backend error: {0}")]
    Backend(String),

    #[error("directory record not found: {0}")]
    NotFound(String),
}
