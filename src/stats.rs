use crate::error::{Error, Result};
use crate::model::Sample;

/// Running mean and sum of squared deviations of one series of values.
struct Accumulator {
    n_vals: usize,
    mean: f64,
    diff_2_sum: f64,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            n_vals: 0,
            mean: 0.0,
            diff_2_sum: 0.0,
        }
    }

    fn add(&mut self, val: f64) {
        self.n_vals += 1;

        let diff_a = val - self.mean;
        self.mean += diff_a / self.n_vals as f64;

        let diff_b = val - self.mean;
        self.diff_2_sum += diff_a * diff_b;
    }

    /// Unbiased sample variance, only defined for two or more values.
    fn var(&self) -> Option<f64> {
        if self.n_vals < 2 {
            return None;
        }
        Some(self.diff_2_sum / (self.n_vals - 1) as f64)
    }
}

/// Compute the unbiased (denominator `n - 1`) variance of each axis.
///
/// This is the single variance routine shared by noise estimation and
/// window scoring, so both always agree on the estimator.
///
/// # Errors
/// Returns [`Error::InsufficientSamples`] for fewer than two samples and
/// [`Error::NonFiniteVariance`] if a sample is not finite or the variance
/// overflows.
pub fn axis_variances(samples: &[Sample]) -> Result<[f64; 3]> {
    let mut acc_vec = [Accumulator::new(), Accumulator::new(), Accumulator::new()];
    for sample in samples {
        for (acc, val) in acc_vec.iter_mut().zip(sample.axes()) {
            acc.add(val);
        }
    }

    let mut var_vec = [0.0; 3];
    for (axis, (var, acc)) in var_vec.iter_mut().zip(&acc_vec).enumerate() {
        *var = acc.var().ok_or(Error::InsufficientSamples {
            needed: 2,
            available: samples.len(),
        })?;
        if !var.is_finite() {
            return Err(Error::NonFiniteVariance { axis });
        }
    }
    Ok(var_vec)
}
