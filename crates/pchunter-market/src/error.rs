use thiserror::Error;

/// Errors surfaced to callers of the market operations.
///
/// Source failures never appear here: they are absorbed at the scan fan-in.
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("query must not be empty")]
    EmptyQuery,

    #[error("catalog error: {reason}")]
    Catalog { reason: String },

    #[error("invalid submission: {reason}")]
    InvalidSubmission { reason: String },
}
