use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("could not find report \"{0}\"")]
    NotFound(String),

    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error("report \"{0}\" has no encounters")]
    EmptyReport(String),
}

/// Raised when a write addresses a node of the wrong kind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatError {
    #[error("expected {expected} at {path}")]
    ShapeMismatch { path: String, expected: &'static str },
}
