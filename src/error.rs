use thiserror::Error;

/// Domain error for the statistics and quoting operations.
///
/// Raised synchronously at the point of violation and propagated unchanged
/// to the caller; the presentation layer is responsible for display.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// Not enough observations for the requested computation.
    #[error("insufficient data: expected at least {expected} observations, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// The series carries no usable variability.
    #[error("degenerate variance: {0}")]
    DegenerateVariance(String),

    /// Invalid parameter or observation value provided by the caller.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Numerical computation failure.
    #[error("computation error: {0}")]
    Computation(String),
}

pub type Result<T> = std::result::Result<T, QuoteError>;
