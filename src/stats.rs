use crate::error::{QuoteError, Result};
use crate::series::ObservationSeries;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

/// Descriptive statistics of an observation series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub lag_1_autocorr: f64,
}

/// Due date quoted for a batch of future completions at a requested
/// confidence level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    pub confidence: f64,
    pub batch_size: usize,
    pub expected_time: f64,
    pub inflation_factor: f64,
    pub z_score: f64,
    pub std_error: f64,
    pub safety_time: f64,
    pub due_date: f64,
}

/// Compute the sample mean, sample variance and lag-1 autocorrelation of a series.
pub fn compute_statistics(series: &ObservationSeries) -> Result<SummaryStatistics> {
    let values = series.values();
    let n = values.len();

    let mean = values.iter().sum::<f64>() / n as f64;

    // Unbiased estimator: the squared deviations are divided by n - 1, not n.
    let sq_dev_sum = values.iter().map(|&val| (val - mean).powi(2)).sum::<f64>();
    let variance = sq_dev_sum / (n - 1) as f64;

    if sq_dev_sum == 0.0 {
        return Err(QuoteError::DegenerateVariance(format!(
            "all {n} observations are identical, so the autocorrelation is undefined"
        )));
    }

    // Both lagged windows are centered on the overall mean and normalized by
    // the overall sum of squared deviations, not by per-window statistics.
    let lag_cov_sum = values
        .windows(2)
        .map(|pair| (pair[0] - mean) * (pair[1] - mean))
        .sum::<f64>();
    let lag_1_autocorr = lag_cov_sum / sq_dev_sum;

    Ok(SummaryStatistics {
        mean,
        variance,
        std_dev: variance.sqrt(),
        lag_1_autocorr,
    })
}

/// Variance inflation of a sum of consecutive observations under lag-1
/// serial correlation: (1 + rho) / (1 - rho), the long-run variance ratio
/// of a first-order autoregressive process.
pub fn variance_inflation(rho_1: f64) -> Result<f64> {
    if rho_1 >= 1.0 || rho_1 <= -1.0 {
        return Err(QuoteError::DegenerateVariance(format!(
            "lag-1 autocorrelation must be strictly between -1 and 1, but is {rho_1}"
        )));
    }
    Ok((1.0 + rho_1) / (1.0 - rho_1))
}

/// Quote a due date for `batch_size` future completions at the requested
/// confidence level.
pub fn quote(series: &ObservationSeries, batch_size: usize, confidence: f64) -> Result<Quote> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(QuoteError::InvalidParameter(format!(
            "confidence level must be in the open interval (0, 1), but is {confidence}"
        )));
    }
    if batch_size < 1 {
        return Err(QuoteError::InvalidParameter(format!(
            "batch size must be at least 1, but is {batch_size}"
        )));
    }

    let stats = compute_statistics(series)?;
    let inflation_factor = variance_inflation(stats.lag_1_autocorr)?;

    let expected_time = batch_size as f64 * stats.mean;
    let std_error = (batch_size as f64 * stats.variance * inflation_factor).sqrt();

    // The sum over the batch is approximated as Normal (central limit theorem).
    let normal = Normal::new(0.0, 1.0).map_err(|err| {
        QuoteError::Computation(format!("failed to construct standard normal: {err}"))
    })?;
    let z_score = normal.inverse_cdf(confidence);

    let safety_time = z_score * std_error;
    let due_date = expected_time + safety_time;

    Ok(Quote {
        confidence,
        batch_size,
        expected_time,
        inflation_factor,
        z_score,
        std_error,
        safety_time,
        due_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn series(values: &[f64]) -> ObservationSeries {
        ObservationSeries::new(values.to_vec()).expect("valid test series")
    }

    #[test]
    fn statistics_use_the_unbiased_variance_divisor() {
        let stats =
            compute_statistics(&series(&[38.0, 40.0, 42.0, 44.0, 41.0, 39.0, 43.0])).unwrap();
        assert_relative_eq!(stats.mean, 41.0);
        assert_relative_eq!(stats.variance, 28.0 / 6.0);
        assert_relative_eq!(stats.std_dev, (28.0f64 / 6.0).sqrt());
    }

    #[test]
    fn autocorrelation_is_normalized_by_the_overall_baseline() {
        let stats =
            compute_statistics(&series(&[38.0, 40.0, 42.0, 44.0, 41.0, 39.0, 43.0])).unwrap();
        assert_relative_eq!(stats.lag_1_autocorr, 1.0 / 28.0);
    }

    #[test]
    fn constant_series_has_degenerate_variance() {
        let result = compute_statistics(&series(&[5.0, 5.0, 5.0, 5.0]));
        assert!(matches!(result, Err(QuoteError::DegenerateVariance(_))));
    }

    #[test]
    fn inflation_factor_follows_the_ar1_ratio() {
        assert_relative_eq!(variance_inflation(0.0).unwrap(), 1.0);
        assert_relative_eq!(variance_inflation(0.5).unwrap(), 3.0);
        // Negative autocorrelation deflates the variance and is not floored.
        assert_relative_eq!(variance_inflation(-0.5).unwrap(), 1.0 / 3.0);
    }

    #[test]
    fn unit_autocorrelation_is_rejected() {
        assert!(matches!(
            variance_inflation(1.0),
            Err(QuoteError::DegenerateVariance(_))
        ));
        assert!(matches!(
            variance_inflation(-1.0),
            Err(QuoteError::DegenerateVariance(_))
        ));
    }

    #[test]
    fn due_date_exceeds_the_expected_time() {
        let q = quote(&series(&[38.0, 40.0, 42.0, 44.0, 41.0, 39.0, 43.0]), 1, 0.90).unwrap();
        assert_relative_eq!(q.expected_time, 41.0);
        assert_relative_eq!(q.z_score, 1.2816, max_relative = 1e-3);
        assert!(q.safety_time > 0.0);
        assert!(q.due_date > q.expected_time);
        assert_relative_eq!(q.due_date, q.expected_time + q.safety_time);
    }

    #[test]
    fn higher_confidence_never_shortens_the_due_date() {
        let s = series(&[32.5, 35.5, 40.0, 38.5, 29.5, 37.0, 40.0, 49.0, 44.0]);
        let q_90 = quote(&s, 1, 0.90).unwrap();
        let q_95 = quote(&s, 1, 0.95).unwrap();
        assert_relative_eq!(q_95.z_score, 1.6449, max_relative = 1e-3);
        assert!(q_95.due_date >= q_90.due_date);
    }

    #[test]
    fn positive_autocorrelation_needs_more_safety_time() {
        // Same multiset, so equal mean and variance; only the ordering differs.
        let ascending = series(&[38.0, 39.0, 40.0, 41.0, 42.0, 43.0, 44.0]);
        let alternating = series(&[38.0, 44.0, 39.0, 43.0, 40.0, 42.0, 41.0]);

        let stats_asc = compute_statistics(&ascending).unwrap();
        let stats_alt = compute_statistics(&alternating).unwrap();
        assert_relative_eq!(stats_asc.mean, stats_alt.mean);
        assert_relative_eq!(stats_asc.variance, stats_alt.variance);
        assert!(stats_asc.lag_1_autocorr > 0.0);
        assert!(stats_alt.lag_1_autocorr < 0.0);

        let q_asc = quote(&ascending, 1, 0.90).unwrap();
        let q_alt = quote(&alternating, 1, 0.90).unwrap();
        assert!(q_asc.safety_time > q_alt.safety_time);
    }

    #[test]
    fn quoting_is_deterministic() {
        let s = series(&[32.5, 35.5, 40.0, 38.5, 29.5]);
        let first = quote(&s, 25, 0.90).unwrap();
        let second = quote(&s, 25, 0.90).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn batch_size_scales_the_expected_time() {
        let s = series(&[32.5, 35.5, 40.0, 38.5, 29.5]);
        let q_1 = quote(&s, 1, 0.90).unwrap();
        let q_25 = quote(&s, 25, 0.90).unwrap();
        assert_relative_eq!(q_25.expected_time, 25.0 * q_1.expected_time);
        assert_relative_eq!(q_25.std_error, 5.0 * q_1.std_error, max_relative = 1e-12);
    }

    #[test]
    fn boundary_parameters_are_rejected() {
        let s = series(&[32.5, 35.5, 40.0]);
        assert!(matches!(
            quote(&s, 1, 0.0),
            Err(QuoteError::InvalidParameter(_))
        ));
        assert!(matches!(
            quote(&s, 1, 1.0),
            Err(QuoteError::InvalidParameter(_))
        ));
        assert!(matches!(
            quote(&s, 0, 0.9),
            Err(QuoteError::InvalidParameter(_))
        ));
    }

    proptest! {
        #[test]
        fn variance_is_nonnegative_and_autocorrelation_is_bounded(
            values in prop::collection::vec(0.001..10_000.0f64, 2..200)
        ) {
            let s = ObservationSeries::new(values).unwrap();
            match compute_statistics(&s) {
                Ok(stats) => {
                    prop_assert!(stats.variance >= 0.0);
                    prop_assert!(stats.lag_1_autocorr >= -1.0 - 1e-9);
                    prop_assert!(stats.lag_1_autocorr <= 1.0 + 1e-9);
                }
                // A generated series may still be constant.
                Err(QuoteError::DegenerateVariance(_)) => {}
                Err(err) => prop_assert!(false, "unexpected error: {err}"),
            }
        }
    }
}
