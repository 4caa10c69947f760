//! Systematic noise estimation from a stationary reference segment.

use crate::error::{Error, Result};
use crate::model::Sample;
use crate::stats::axis_variances;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Convention used to combine the per-axis reference variances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseMode {
    /// Sum of the three axis variances.
    Paper,
    /// Mean of the three axis variances.
    Bai,
}

impl FromStr for NoiseMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "paper" => Ok(Self::Paper),
            "bai" => Ok(Self::Bai),
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for NoiseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paper => f.write_str("paper"),
            Self::Bai => f.write_str("bai"),
        }
    }
}

/// Estimate the systematic noise variance of a device.
///
/// `reference` must be recorded while the accelerometer is at rest. The
/// variance of each axis is taken over the whole segment and combined
/// according to `mode`.
///
/// # Errors
/// Returns [`Error::InsufficientSamples`] if `reference` has fewer than two
/// samples, [`Error::NonFiniteVariance`] if an axis variance is not finite
/// and [`Error::InvalidNoise`] if their combination overflows.
pub fn estimate_noise(reference: &[Sample], mode: NoiseMode) -> Result<f64> {
    let var_sum: f64 = axis_variances(reference)?.iter().sum();
    let noise = match mode {
        NoiseMode::Paper => var_sum,
        NoiseMode::Bai => var_sum / 3.0,
    };
    if !noise.is_finite() {
        return Err(Error::InvalidNoise(noise));
    }
    Ok(noise)
}
