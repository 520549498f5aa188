//! Pipeline configuration.

use depthdump_format::{BID_COLUMN, CsvCuller};
use depthdump_types::DateNaming;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// How the "already present" probe locates a day's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExistenceCheck {
    /// Probe `{dest}/{stem}.csv`, the file the pipeline actually writes.
    #[default]
    Output,
    /// Probe `{dest}/f{stem}.csv`.
    ///
    /// Matches the historical scraper, whose probe never finds the files it
    /// wrote, so every day is downloaded again.
    LegacyPrefixed,
}

impl ExistenceCheck {
    /// Returns the path probed for the day named `stem`.
    #[must_use]
    pub fn probe_path(&self, dest: &Path, stem: &str) -> PathBuf {
        match self {
            Self::Output => dest.join(format!("{stem}.csv")),
            Self::LegacyPrefixed => dest.join(format!("f{stem}.csv")),
        }
    }
}

/// Files involved in materializing one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPaths {
    /// Downloaded gzip payload.
    pub gzip: PathBuf,
    /// Decompressed CSV before culling.
    pub raw: PathBuf,
    /// Culled CSV while it is being written, renamed to `csv` on success.
    pub partial: PathBuf,
    /// Final CSV.
    pub csv: PathBuf,
    /// Path checked by the existence probe.
    pub probe: PathBuf,
}

/// Options controlling where and how daily files are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Destination directory, created if missing.
    pub dest: PathBuf,
    /// Skip days whose output is already present.
    pub skip_existing: bool,
    /// Probe used when `skip_existing` is on.
    pub existence_check: ExistenceCheck,
    /// Columns to drop. Empty disables culling.
    pub cull_columns: BTreeSet<String>,
    /// Write the header row.
    pub include_header: bool,
    /// Date convention for file names.
    pub naming: DateNaming,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dest: PathBuf::from("."),
            skip_existing: true,
            existence_check: ExistenceCheck::default(),
            cull_columns: BTreeSet::from([BID_COLUMN.to_string()]),
            include_header: true,
            naming: DateNaming::default(),
        }
    }
}

impl PipelineConfig {
    /// Creates a configuration writing into `dest` with default options.
    #[must_use]
    pub fn new(dest: impl Into<PathBuf>) -> Self {
        Self {
            dest: dest.into(),
            ..Default::default()
        }
    }

    /// Sets whether existing days are skipped.
    #[must_use]
    pub const fn with_skip_existing(mut self, skip: bool) -> Self {
        self.skip_existing = skip;
        self
    }

    /// Sets the existence probe.
    #[must_use]
    pub const fn with_existence_check(mut self, check: ExistenceCheck) -> Self {
        self.existence_check = check;
        self
    }

    /// Sets the columns to drop.
    #[must_use]
    pub fn with_cull_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cull_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets whether the header row is written.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Sets the file naming convention.
    #[must_use]
    pub const fn with_naming(mut self, naming: DateNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Builds the CSV culler for these options.
    #[must_use]
    pub fn culler(&self) -> CsvCuller {
        CsvCuller::new()
            .with_drop(self.cull_columns.iter().cloned())
            .with_header(self.include_header)
    }

    /// Returns the paths used for the day named `stem`.
    #[must_use]
    pub fn day_paths(&self, stem: &str) -> DayPaths {
        DayPaths {
            gzip: self.dest.join(format!("{stem}.gz")),
            raw: self.dest.join(format!("{stem}.ne")),
            partial: self.dest.join(format!("{stem}.csv.part")),
            csv: self.dest.join(format!("{stem}.csv")),
            probe: self.existence_check.probe_path(&self.dest, stem),
        }
    }
}
