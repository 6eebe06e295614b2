use thiserror::Error;

/// Errors raised before a sampling run starts.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("a profile line needs at least 2 vertices, got {0}")]
    DegenerateGeometry(usize),

    #[error("resolution must be above 0, got {0}")]
    InvalidResolution(f64),

    #[error("maximum number of points must be above 0")]
    InvalidMaxPoints,

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Terminal failure of a sampling run.
///
/// Only ever delivered inside [`Outcome::Failed`](crate::Outcome::Failed).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeightQueryError {
    #[error("height query failed: {0}")]
    Provider(String),

    #[error("sampling task aborted: {0}")]
    Aborted(String),
}

impl HeightQueryError {
    /// Normalizes whatever a provider reports into an error value.
    pub fn provider<E: std::fmt::Display>(err: E) -> Self {
        Self::Provider(err.to_string())
    }
}
