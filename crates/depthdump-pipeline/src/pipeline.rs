//! Day-by-day fetch-and-materialize pipeline.

use depthdump_fetch::{DepthSource, decompress_file};
use depthdump_format::CsvCuller;
use depthdump_types::{DayRange, DayRangeError, DepthError, Market, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::{DayPaths, ExistenceCheck, PipelineConfig};

/// What happened to a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOutcome {
    /// The day's CSV was written.
    Written {
        /// Number of data rows in the CSV.
        rows: usize,
    },
    /// The day was already present and nothing was fetched.
    Skipped,
}

/// Result of processing a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayReport {
    /// Day timestamp.
    pub day: i64,
    /// Final CSV path.
    pub path: PathBuf,
    /// What happened.
    pub outcome: DayOutcome,
}

/// Totals of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// CSV files written, in day order.
    pub written: Vec<PathBuf>,
    /// CSV paths of skipped days, in day order.
    pub skipped: Vec<PathBuf>,
}

impl RunSummary {
    /// Returns the number of days visited.
    #[must_use]
    pub fn total(&self) -> usize {
        self.written.len() + self.skipped.len()
    }

    fn record(&mut self, report: &DayReport) {
        match report.outcome {
            DayOutcome::Written { .. } => self.written.push(report.path.clone()),
            DayOutcome::Skipped => self.skipped.push(report.path.clone()),
        }
    }
}

/// Sequential download pipeline for one market.
///
/// Days are processed strictly in order and each one is finished before the
/// next begins. The first error stops the run; files written for earlier
/// days stay in place.
#[derive(Debug)]
pub struct Pipeline<S> {
    source: S,
    market: Market,
    config: PipelineConfig,
}

impl<S: DepthSource> Pipeline<S> {
    /// Creates a pipeline reading from `source`.
    pub const fn new(source: S, market: Market, config: PipelineConfig) -> Self {
        Self {
            source,
            market,
            config,
        }
    }

    /// Returns the pipeline configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Returns the market this pipeline downloads.
    #[must_use]
    pub const fn market(&self) -> &Market {
        &self.market
    }

    /// Builds the day range, asking the source for the end when not given.
    ///
    /// # Errors
    ///
    /// Returns an error if the end lookup fails or the range is invalid.
    pub async fn resolve_range(&self, start: i64, end: Option<i64>) -> Result<DayRange> {
        let end = match end {
            Some(end) => end,
            None => {
                let end = self.source.end_time(&self.market, start).await?;
                info!(start, end, market = %self.market, "resolved end time");
                end
            }
        };
        Ok(DayRange::new(start, end)?)
    }

    /// Creates the destination directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination exists but is not a directory or
    /// cannot be created.
    pub fn ensure_dest(&self) -> Result<()> {
        ensure_dir(&self.config.dest)
    }

    /// Resolves the range and processes every day in it.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub async fn run(&self, start: i64, end: Option<i64>) -> Result<RunSummary> {
        let range = self.resolve_range(start, end).await?;
        self.run_range(range, |_| {}).await
    }

    /// Processes every day in `range`, calling `on_day` after each one.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub async fn run_range<F>(&self, range: DayRange, mut on_day: F) -> Result<RunSummary>
    where
        F: FnMut(&DayReport),
    {
        self.ensure_dest()?;
        if self.config.skip_existing && self.config.existence_check == ExistenceCheck::LegacyPrefixed
        {
            warn!("legacy existence check never matches written files; every day will be fetched");
        }

        let mut summary = RunSummary::default();
        for day in range.days() {
            let report = self.process_day(day).await?;
            summary.record(&report);
            on_day(&report);
        }

        info!(
            written = summary.written.len(),
            skipped = summary.skipped.len(),
            "run complete"
        );
        Ok(summary)
    }

    /// Downloads and materializes a single day.
    ///
    /// # Errors
    ///
    /// Returns an error if any network, decompression, culling or file
    /// operation fails.
    pub async fn process_day(&self, day: i64) -> Result<DayReport> {
        let stem = self
            .config
            .naming
            .file_stem(day)
            .ok_or(DayRangeError::Unrepresentable(day))?;
        let paths = self.config.day_paths(&stem);

        if self.config.skip_existing && paths.probe.exists() {
            info!(day, path = %paths.csv.display(), "already present, skipping");
            return Ok(DayReport {
                day,
                path: paths.csv,
                outcome: DayOutcome::Skipped,
            });
        }

        let url = self.source.file_url(&self.market, day).await?;
        let payload = self.source.download(&url).await?;
        tokio::fs::write(&paths.gzip, &payload).await?;
        debug!(path = %paths.gzip.display(), len = payload.len(), "saved payload");

        let culler = self.config.culler();
        let csv = paths.csv.clone();
        let rows = tokio::task::spawn_blocking(move || materialize(&paths, &culler))
            .await
            .map_err(join_error)??;

        info!(day, rows, path = %csv.display(), "written");
        Ok(DayReport {
            day,
            path: csv,
            outcome: DayOutcome::Written { rows },
        })
    }
}

/// Turns a downloaded payload into the final CSV and removes intermediates.
///
/// The final CSV only appears once culling has succeeded, so a failed day is
/// never mistaken for a present one.
fn materialize(paths: &DayPaths, culler: &CsvCuller) -> Result<usize> {
    decompress_file(&paths.gzip, &paths.raw)?;
    fs::remove_file(&paths.gzip)?;

    let rows = match culler.cull_file(&paths.raw, &paths.partial) {
        Ok(rows) => rows,
        Err(err) => {
            let _ = fs::remove_file(&paths.partial);
            return Err(err.into());
        }
    };
    fs::rename(&paths.partial, &paths.csv)?;
    fs::remove_file(&paths.raw)?;
    debug!(path = %paths.raw.display(), "removed intermediates");

    Ok(rows)
}

/// A worker that panicked or was cancelled surfaces as an I/O failure.
fn join_error(err: tokio::task::JoinError) -> DepthError {
    DepthError::Io(std::io::Error::other(err))
}

fn ensure_dir(dest: &Path) -> Result<()> {
    if dest.is_dir() {
        return Ok(());
    }
    if dest.exists() {
        return Err(DepthError::NotADirectory(dest.to_path_buf()));
    }
    fs::create_dir_all(dest)?;
    debug!(path = %dest.display(), "created destination");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_worker_panic_is_io_error() {
        let err = tokio::task::spawn_blocking(|| -> usize { panic!("worker died") })
            .await
            .map_err(join_error)
            .unwrap_err();
        assert!(matches!(err, DepthError::Io(_)));
    }

    #[test]
    fn test_ensure_dir_creates_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("nested").join("out");
        ensure_dir(&dest).unwrap();
        assert!(dest.is_dir());
        ensure_dir(&dest).unwrap();
    }

    #[test]
    fn test_ensure_dir_rejects_file() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out");
        fs::write(&dest, "not a dir").unwrap();
        assert!(matches!(
            ensure_dir(&dest),
            Err(DepthError::NotADirectory(p)) if p == dest
        ));
    }

    #[test]
    fn test_run_summary_record() {
        let mut summary = RunSummary::default();
        summary.record(&DayReport {
            day: 0,
            path: PathBuf::from("a.csv"),
            outcome: DayOutcome::Written { rows: 3 },
        });
        summary.record(&DayReport {
            day: 86_400,
            path: PathBuf::from("b.csv"),
            outcome: DayOutcome::Skipped,
        });
        assert_eq!(summary.total(), 2);
        assert_eq!(summary.written, vec![PathBuf::from("a.csv")]);
        assert_eq!(summary.skipped, vec![PathBuf::from("b.csv")]);
    }
}
