//! Error types for the grid model.

/// Failure of a single per-cell update request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateError {
    /// Server answered with a non-success status.
    #[error("server responded with HTTP {0}")]
    Http(u16),

    /// Request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// Response arrived but its body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),

    /// Fragment did not contain an element to swap in.
    #[error("response fragment has no element with id prefix {0:?}")]
    MissingFragment(String),
}

/// Reason a batch update was refused before any request was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    #[error("No cells selected")]
    Empty,
}

/// Failure to rebuild a cell key from its string or attribute form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CellKeyError {
    #[error("cell key {0:?} has no delimiter")]
    MissingDelimiter(String),

    #[error("invalid student id {0:?}")]
    StudentId(String),

    #[error("invalid date {0:?}")]
    Date(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid grid config: {0}")]
    Json(#[from] serde_json::Error),
}
