//! Activity Index of tri-axial accelerometer signals.
//!
//! The device noise is estimated once from a stationary reference segment
//! with [`estimate_noise`], then every one-second window of the signal is
//! scored against it with [`score_window`]. [`score_signal`] sums the window
//! scores of a whole signal.

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod index;
pub mod manager;
pub mod model;
pub mod noise;
mod stats;

pub use error::{Error, Result};
pub use index::{
    Epoch, SignalScore, score_series, score_signal, score_window, summarize_epochs, window_count,
};
pub use model::Sample;
pub use noise::{NoiseMode, estimate_noise};
pub use stats::axis_variances;
