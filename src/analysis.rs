use crate::config::Config;
use crate::data::Recording;
use crate::index::{Epoch, SignalScore, score_series, summarize_epochs};
use crate::noise::{NoiseMode, estimate_noise};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Activity Index results of one recording.
#[derive(Debug, Serialize, Deserialize)]
pub struct Report {
    pub mode: NoiseMode,
    pub noise: f64,
    pub freq: usize,
    pub relative: bool,
    pub score: SignalScore,
    pub mean: Option<f64>,
    pub series: Vec<f64>,
    pub epochs: Vec<Epoch>,
}

impl Report {
    /// Save the report as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        let file = file.as_ref();
        let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, self).context("failed to serialize report")?;
        writer.flush().context("failed to flush writer stream")?;

        Ok(())
    }
}

/// Recording analyzer.
///
/// Estimates the device noise on the reference range of a recording and
/// scores its analysis range.
pub struct Analyzer {
    cfg: Config,
}

impl Analyzer {
    pub fn new(cfg: Config) -> Self {
        Self { cfg }
    }

    pub fn analyze_file<P: AsRef<Path>>(&self, file: P) -> Result<Report> {
        let file = file.as_ref();
        let recording =
            Recording::from_file(file, self.cfg.recording.delimiter, self.cfg.recording.skip_rows)
                .with_context(|| format!("failed to load {file:?}"))?;
        log::debug!("loaded {} samples", recording.samples().len());

        self.analyze_recording(&recording)
    }

    pub fn analyze_recording(&self, recording: &Recording) -> Result<Report> {
        let noise_cfg = &self.cfg.noise;
        let reference = recording
            .slice(noise_cfg.start..noise_cfg.end)
            .context("failed to select reference range")?;
        let noise = estimate_noise(reference, noise_cfg.mode).context("failed to estimate noise")?;
        log::info!("estimated noise {noise:e} ({} mode)", noise_cfg.mode);

        let ana_cfg = &self.cfg.analysis;
        let end = ana_cfg.end.unwrap_or(recording.samples().len());
        let signal = recording
            .slice(ana_cfg.start..end)
            .context("failed to select analysis range")?;

        let freq = self.cfg.recording.freq;
        let series = score_series(signal, noise, freq, ana_cfg.relative)
            .context("failed to score signal")?;
        let score = SignalScore {
            total: series.iter().sum(),
            windows: series.len(),
        };
        let epochs =
            summarize_epochs(&series, ana_cfg.epoch_secs).context("failed to summarize epochs")?;
        log::info!("scored {} windows, total {:.6}", score.windows, score.total);

        Ok(Report {
            mode: noise_cfg.mode,
            noise,
            freq,
            relative: ana_cfg.relative,
            score,
            mean: score.mean(),
            series,
            epochs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::score_signal;

    fn config(relative: bool) -> Config {
        format!(
            "[recording]\nfreq = 4\n\n[noise]\nmode = \"paper\"\nstart = 0\nend = 8\n\n\
             [analysis]\nstart = 8\nrelative = {relative}\nepoch_secs = 2\n"
        )
        .parse()
        .unwrap()
    }

    fn recording() -> Recording {
        let mut contents = String::new();
        for i in 0..8 {
            let val = if i % 2 == 0 { 0.01 } else { -0.01 };
            contents += &format!("{val},{val},{}\n", 1.0 + val);
        }
        for i in 0..18 {
            let val = (i % 4) as f64 * 0.5;
            contents += &format!("{val},{},{}\n", -val, 1.0 + val);
        }
        Recording::from_reader(contents.as_bytes(), ',', 0).unwrap()
    }

    #[test]
    fn report_matches_core_scoring() {
        let recording = recording();
        let report = Analyzer::new(config(false))
            .analyze_recording(&recording)
            .unwrap();

        let reference = &recording.samples()[..8];
        assert_eq!(report.noise, estimate_noise(reference, NoiseMode::Paper).unwrap());

        let signal = &recording.samples()[8..];
        let score = score_signal(signal, report.noise, 4, false).unwrap();
        assert_eq!(report.score.windows, 4);
        assert!((report.score.total - score.total).abs() < 1e-12);
        assert_eq!(report.series.len(), 4);
        assert_eq!(report.epochs.len(), 2);
        assert!(report.mean.is_some());
    }

    #[test]
    fn rejects_range_past_recording() {
        let mut cfg = config(true);
        cfg.analysis.end = Some(100);
        assert!(Analyzer::new(cfg).analyze_recording(&recording()).is_err());
    }
}
