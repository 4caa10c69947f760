use crate::noise::NoiseMode;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Study configuration parameters.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Recording format parameters.
    pub recording: RecordingConfig,
    /// Noise estimation parameters.
    pub noise: NoiseConfig,
    /// Scoring parameters.
    pub analysis: AnalysisConfig,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Sampling frequency (samples per second).
    pub freq: usize,
    /// Field delimiter.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Number of header rows to skip.
    #[serde(default)]
    pub skip_rows: usize,
    /// Glob pattern of the recordings, relative to the study directory.
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Combination of the axis variances.
    pub mode: NoiseMode,
    /// First sample of the stationary reference.
    pub start: usize,
    /// End (exclusive) of the stationary reference.
    pub end: usize,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// First sample of the scored range.
    #[serde(default)]
    pub start: usize,
    /// End (exclusive) of the scored range, the whole recording if absent.
    pub end: Option<usize>,
    /// Divide the deviations by the noise.
    #[serde(default)]
    pub relative: bool,
    /// Number of windows per epoch.
    #[serde(default = "default_epoch_secs")]
    pub epoch_secs: usize,
}

fn default_delimiter() -> char {
    ','
}

fn default_pattern() -> String {
    "*.csv".to_string()
}

fn default_epoch_secs() -> usize {
    60
}

impl Config {
    /// Load a [`Config`] from a file.
    ///
    /// The file must be TOML-encoded and contain a serialized [`Config`].
    /// Performs validation on all parameters before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        contents.parse()
    }

    fn validate(&self) -> Result<()> {
        self.recording
            .validate()
            .context("invalid recording parameters")?;
        self.noise.validate().context("invalid noise parameters")?;
        self.analysis
            .validate()
            .context("invalid analysis parameters")?;
        Ok(())
    }
}

impl std::str::FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }
}

impl RecordingConfig {
    fn validate(&self) -> Result<()> {
        check_num(self.freq, 2..=10_000).context("invalid sampling frequency")?;
        // Exponent markers would split numbers such as `1e-3`.
        if self.delimiter.is_ascii_digit()
            || matches!(self.delimiter, '.' | '-' | '+' | 'e' | 'E')
        {
            bail!("delimiter {:?} clashes with number syntax", self.delimiter);
        }
        check_num(self.skip_rows, 0..1_000).context("invalid number of header rows")?;
        if self.pattern.is_empty() {
            bail!("recording pattern must not be empty");
        }
        Ok(())
    }
}

impl NoiseConfig {
    fn validate(&self) -> Result<()> {
        check_range(self.start, self.end, 2).context("invalid reference range")
    }
}

impl AnalysisConfig {
    fn validate(&self) -> Result<()> {
        if let Some(end) = self.end {
            check_range(self.start, end, 1).context("invalid analysis range")?;
        }
        check_num(self.epoch_secs, 1..=86_400).context("invalid number of windows per epoch")?;
        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}

fn check_range(start: usize, end: usize, min_len: usize) -> Result<()> {
    // Ensure range holds at least the minimum number of samples.
    if end < start + min_len {
        bail!("range {start}..{end} must hold at least {min_len} samples");
    }
    Ok(())
}
