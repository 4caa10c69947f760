use crate::model::Sample;
use anyhow::{Context, Result, bail};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    ops::Range,
    path::Path,
};

/// Tri-axial recording loaded from a delimited text file.
///
/// The first three fields of every row are the x, y and z readings.
/// Further fields are ignored.
#[derive(Debug)]
pub struct Recording {
    samples: Vec<Sample>,
}

impl Recording {
    /// Load a [`Recording`] from a file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or if any row does not
    /// hold three finite numbers.
    pub fn from_file<P: AsRef<Path>>(file: P, delimiter: char, skip_rows: usize) -> Result<Self> {
        let file = file.as_ref();
        let file = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
        let reader = BufReader::new(file);

        Self::from_reader(reader, delimiter, skip_rows)
    }

    /// Load a [`Recording`] from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R, delimiter: char, skip_rows: usize) -> Result<Self> {
        let mut samples = Vec::new();
        for (i_line, line) in reader.lines().enumerate().skip(skip_rows) {
            let line = line.with_context(|| format!("failed to read line {}", i_line + 1))?;
            if line.trim().is_empty() {
                continue;
            }
            let sample =
                parse_row(&line, delimiter).with_context(|| format!("invalid line {}", i_line + 1))?;
            samples.push(sample);
        }
        Ok(Self { samples })
    }

    /// Get all the samples of the recording.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Get the samples in `range`.
    ///
    /// # Errors
    /// Returns an error if `range` extends past the end of the recording.
    pub fn slice(&self, range: Range<usize>) -> Result<&[Sample]> {
        let len = self.samples.len();
        match self.samples.get(range.clone()) {
            Some(samples) => Ok(samples),
            None => bail!("range {range:?} is out of bounds for {len} samples"),
        }
    }
}

fn parse_row(line: &str, delimiter: char) -> Result<Sample> {
    let mut fields = line.split(delimiter);
    let mut axes = [0.0; 3];
    for (i_col, val) in axes.iter_mut().enumerate() {
        let field = fields
            .next()
            .with_context(|| format!("missing column {}", i_col + 1))?
            .trim();
        *val = field
            .parse::<f64>()
            .with_context(|| format!("failed to parse column {} ({field:?})", i_col + 1))?;
        if !val.is_finite() {
            bail!("column {} is not finite ({field:?})", i_col + 1);
        }
    }
    Ok(Sample::from(axes))
}
