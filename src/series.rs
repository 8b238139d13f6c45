use crate::error::{QuoteError, Result};

/// Ordered record of the elapsed times between consecutive completions.
///
/// Construction enforces the domain invariants: at least two observations
/// (variance and autocorrelation are undefined otherwise), every value
/// finite and strictly positive (a zero time is a data-entry error).
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSeries {
    values: Vec<f64>,
}

impl ObservationSeries {
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.len() < 2 {
            return Err(QuoteError::InsufficientData {
                expected: 2,
                actual: values.len(),
            });
        }
        for (idx, &val) in values.iter().enumerate() {
            if !val.is_finite() || val <= 0.0 {
                return Err(QuoteError::InvalidParameter(format!(
                    "observation {idx} must be a positive finite number, but is {val}"
                )));
            }
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
