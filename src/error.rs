//! Errors raised by the Activity Index computation.

use thiserror::Error;

/// Failure of a noise estimation or scoring call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Noise estimation mode given as text is not one of the known modes.
    #[error("unknown noise mode {0:?}, expected \"paper\" or \"bai\"")]
    UnknownMode(String),

    /// Relative scoring divides by the noise, which is zero.
    #[error("relative scoring requires a non-zero noise")]
    ZeroNoise,

    /// Noise scalar is negative or not finite.
    #[error("noise must be finite and non-negative, but is {0}")]
    InvalidNoise(f64),

    /// Sampling frequency is zero.
    #[error("sampling frequency must be positive, but is {0}")]
    InvalidFrequency(usize),

    /// Too few samples to compute an unbiased variance.
    #[error("need at least {needed} samples, but have {available}")]
    InsufficientSamples { needed: usize, available: usize },

    /// Variance of an axis overflows or is undefined.
    #[error("variance of axis {axis} is not finite")]
    NonFiniteVariance { axis: usize },

    /// Average deviation of a window overflows or is undefined.
    #[error("average deviation {0} is not finite")]
    NonFiniteDeviation(f64),

    /// Epoch length is zero.
    #[error("epoch length must be positive, but is {0}")]
    InvalidEpoch(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
