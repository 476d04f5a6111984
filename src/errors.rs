use thiserror::Error;

/// Error type that captures common budget-document failures.
///
/// Nothing here is fatal: invalid input and missing ids degrade to a
/// rejected no-op that the caller surfaces to the user.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(String),
}
