//! Synthetic inter-throughput time generation from a stationary AR(1)
//! process, for experimenting with serially correlated production data.

use anyhow::{Result, bail};
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use rand_distr::Normal;

/// Parameters of the AR(1) process used to synthesize a series.
#[derive(Debug, Clone, Copy)]
pub struct GenerateConfig {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub autocorr: f64,
    pub seed: Option<u64>,
}

const MAX_REDRAWS: usize = 1_000;

/// Sample `count` positive observations from a stationary AR(1) process with
/// the given marginal mean, standard deviation and lag-1 coefficient.
pub fn generate_series(cfg: &GenerateConfig) -> Result<Vec<f64>> {
    if cfg.count < 2 {
        bail!("count must be at least 2, but is {}", cfg.count);
    }
    if !(cfg.mean > 0.0) {
        bail!("mean must be positive, but is {}", cfg.mean);
    }
    if !(cfg.std_dev > 0.0) {
        bail!("standard deviation must be positive, but is {}", cfg.std_dev);
    }
    if cfg.autocorr.abs() >= 1.0 {
        bail!(
            "autocorrelation must be strictly between -1 and 1, but is {}",
            cfg.autocorr
        );
    }

    let mut rng = match cfg.seed {
        Some(seed) => ChaCha12Rng::seed_from_u64(seed),
        None => ChaCha12Rng::try_from_os_rng()?,
    };

    // Innovation scale that keeps the marginal standard deviation at std_dev.
    let innov_std_dev = cfg.std_dev * (1.0 - cfg.autocorr.powi(2)).sqrt();
    let marginal = Normal::new(0.0, cfg.std_dev)?;
    let innovation = Normal::new(0.0, innov_std_dev)?;

    let mut values = Vec::with_capacity(cfg.count);
    let mut deviation = 0.0;
    for idx in 0..cfg.count {
        let (dist, carry) = if idx == 0 {
            (&marginal, 0.0)
        } else {
            (&innovation, cfg.autocorr * deviation)
        };

        // Times cannot be zero or negative, so non-positive draws are redrawn.
        let mut redraws = 0;
        let value = loop {
            let candidate = cfg.mean + carry + dist.sample(&mut rng);
            if candidate > 0.0 {
                break candidate;
            }
            redraws += 1;
            if redraws >= MAX_REDRAWS {
                bail!("failed to draw a positive observation after {MAX_REDRAWS} attempts");
            }
        };

        deviation = value - cfg.mean;
        values.push(value);
    }

    Ok(values)
}
