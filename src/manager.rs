use crate::analysis::Analyzer;
use crate::config::Config;
use anyhow::{Context, Result};
use glob::glob;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub struct Manager {
    study_dir: PathBuf,
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(study_dir: P) -> Result<Self> {
        let study_dir = study_dir.as_ref().to_path_buf();

        let cfg =
            Config::from_file(study_dir.join("config.toml")).context("failed to construct cfg")?;
        log::info!("{cfg:#?}");

        Ok(Self { study_dir, cfg })
    }

    pub fn analyze_study(&self) -> Result<()> {
        let recording_files = self
            .recording_files()
            .context("failed to find recording files")?;
        if recording_files.is_empty() {
            log::warn!("no recordings match {:?}", self.cfg.recording.pattern);
            return Ok(());
        }

        let results_dir = self.results_dir();
        fs::create_dir_all(&results_dir)
            .with_context(|| format!("failed to create {results_dir:?}"))?;

        let analyzer = Analyzer::new(self.cfg.clone());
        for recording_file in recording_files {
            log::info!("analyzing {recording_file:?}");
            let report = analyzer
                .analyze_file(&recording_file)
                .with_context(|| format!("failed to analyze {recording_file:?}"))?;

            let results_file = self.results_file(&recording_file)?;
            report
                .save(&results_file)
                .context("failed to save results")?;
            log::info!("saved {results_file:?}");
        }

        Ok(())
    }

    pub fn clean_study(&self) -> Result<()> {
        let results_dir = self.results_dir();
        if results_dir.is_dir() {
            fs::remove_dir_all(&results_dir)
                .with_context(|| format!("failed to remove {results_dir:?}"))?;
            log::info!("removed {results_dir:?}");
        }
        Ok(())
    }

    fn recording_files(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.study_dir.join(&self.cfg.recording.pattern);
        let pattern = pattern.to_str().context("pattern is not valid UTF-8")?;
        let mut files: Vec<_> = glob(pattern)
            .context("failed to glob recording files")?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(error) => {
                    log::warn!("skipping {:?}: {}", error.path(), error.error());
                    None
                }
            })
            .filter(|p| p.is_file())
            .collect();
        files.sort();
        Ok(files)
    }

    fn results_dir(&self) -> PathBuf {
        self.study_dir.join("results")
    }

    fn results_file(&self, recording_file: &Path) -> Result<PathBuf> {
        let stem = recording_file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .with_context(|| format!("{recording_file:?} has no valid file name"))?;
        Ok(self.results_dir().join(format!("{stem}.json")))
    }
}
