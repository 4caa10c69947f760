//! Windowed Activity Index scoring.
//!
//! A signal is cut into consecutive non-overlapping windows of `freq`
//! samples (one second each). Each window is scored against the noise floor
//! of the device and the scores are summed or reported one by one. Samples
//! after the last full window are never scored.

use crate::error::{Error, Result};
use crate::model::Sample;
use crate::stats::axis_variances;
use serde::{Deserialize, Serialize};
use std::slice::ChunksExact;

/// Activity Index of a whole signal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalScore {
    /// Sum of the window scores.
    pub total: f64,
    /// Number of scored windows.
    pub windows: usize,
}

impl SignalScore {
    /// Average score per window, if any window was scored.
    pub fn mean(&self) -> Option<f64> {
        if self.windows == 0 {
            return None;
        }
        Some(self.total / self.windows as f64)
    }
}

/// Summary of a group of consecutive window scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Epoch {
    /// Position of the epoch in the series.
    pub index: usize,
    /// Number of windows in the epoch.
    pub windows: usize,
    /// Sum of the window scores.
    pub total: f64,
    /// Average window score.
    pub mean: f64,
}

/// Number of full windows of `freq` samples in a signal of `len` samples.
///
/// Trailing samples that do not fill a window are discarded.
///
/// # Errors
/// Returns [`Error::InvalidFrequency`] if `freq` is zero.
pub fn window_count(len: usize, freq: usize) -> Result<usize> {
    check_freq(freq)?;
    Ok(len / freq)
}

/// Score a single window of tri-axial samples.
///
/// The deviation of each axis variance from `noise` (divided by `noise` in
/// relative mode) is averaged over the three axes, floored at zero, and
/// square-rooted. The result is never negative.
///
/// # Errors
/// Returns [`Error::InvalidNoise`] for a negative or non-finite `noise`,
/// [`Error::ZeroNoise`] in relative mode with `noise == 0`,
/// [`Error::InsufficientSamples`] if the window has fewer than two samples,
/// and [`Error::NonFiniteVariance`] or [`Error::NonFiniteDeviation`] when the
/// computation overflows.
pub fn score_window(window: &[Sample], noise: f64, relative: bool) -> Result<f64> {
    if !noise.is_finite() || noise < 0.0 {
        return Err(Error::InvalidNoise(noise));
    }
    if relative && noise == 0.0 {
        return Err(Error::ZeroNoise);
    }

    let var_vec = axis_variances(window)?;
    let dev_sum: f64 = var_vec
        .iter()
        .map(|&var| {
            if relative {
                (var - noise) / noise
            } else {
                var - noise
            }
        })
        .sum();

    let avg = dev_sum / 3.0;
    // `max` would hide a NaN average as zero.
    if !avg.is_finite() {
        return Err(Error::NonFiniteDeviation(avg));
    }
    Ok(avg.max(0.0).sqrt())
}

/// Score every full window of a signal and sum the results.
///
/// A signal shorter than one window gives a zero total over zero windows.
///
/// # Errors
/// Returns [`Error::InvalidFrequency`] if `freq` is zero and propagates the
/// first failure of [`score_window`].
pub fn score_signal(
    signal: &[Sample],
    noise: f64,
    freq: usize,
    relative: bool,
) -> Result<SignalScore> {
    let mut score = SignalScore::default();
    for window in windows(signal, freq)? {
        score.total += score_window(window, noise, relative)?;
        score.windows += 1;
    }
    log::debug!(
        "scored {} windows, discarded {} trailing samples",
        score.windows,
        signal.len() - score.windows * freq
    );
    Ok(score)
}

/// Score every full window of a signal, keeping the scores in order.
///
/// # Errors
/// Same as [`score_signal`].
pub fn score_series(
    signal: &[Sample],
    noise: f64,
    freq: usize,
    relative: bool,
) -> Result<Vec<f64>> {
    windows(signal, freq)?
        .map(|window| score_window(window, noise, relative))
        .collect()
}

/// Group consecutive window scores into epochs of `epoch_len` windows.
///
/// The last epoch holds the remaining windows and may be shorter.
///
/// # Errors
/// Returns [`Error::InvalidEpoch`] if `epoch_len` is zero.
pub fn summarize_epochs(series: &[f64], epoch_len: usize) -> Result<Vec<Epoch>> {
    if epoch_len == 0 {
        return Err(Error::InvalidEpoch(epoch_len));
    }
    let epochs = series
        .chunks(epoch_len)
        .enumerate()
        .map(|(index, chunk)| {
            let total: f64 = chunk.iter().sum();
            Epoch {
                index,
                windows: chunk.len(),
                total,
                mean: total / chunk.len() as f64,
            }
        })
        .collect();
    Ok(epochs)
}

fn windows(signal: &[Sample], freq: usize) -> Result<ChunksExact<'_, Sample>> {
    check_freq(freq)?;
    Ok(signal.chunks_exact(freq))
}

fn check_freq(freq: usize) -> Result<()> {
    if freq == 0 {
        return Err(Error::InvalidFrequency(freq));
    }
    Ok(())
}
