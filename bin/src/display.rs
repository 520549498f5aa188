//! Display utilities for the depthdump CLI.

use clap::ValueEnum;
use depthdump_lib::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};

/// File naming convention selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum Naming {
    /// YYYY_MM_DD
    Ymd,
    /// DD_MM_YYYY
    Dmy,
}

impl From<Naming> for DateNaming {
    fn from(naming: Naming) -> Self {
        match naming {
            Naming::Ymd => Self::Ymd,
            Naming::Dmy => Self::Dmy,
        }
    }
}

/// Creates the per-day progress bar, hidden in quiet mode.
pub(crate) fn day_progress(range: &DayRange, market: &Market, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(range.total_days() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} days ({percent}%) {msg}")
            .expect("Invalid progress template")
            .progress_chars("=>-"),
    );
    pb.set_message(format!("{market} {range}"));
    pb
}

/// Summarizes a finished run for the progress bar.
pub(crate) fn summary_message(summary: &RunSummary) -> String {
    if summary.skipped.is_empty() {
        format!("Wrote {} files", summary.written.len())
    } else {
        format!(
            "Wrote {} files ({} already present)",
            summary.written.len(),
            summary.skipped.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_naming_conversion() {
        assert_eq!(DateNaming::from(Naming::Ymd), DateNaming::Ymd);
        assert_eq!(DateNaming::from(Naming::Dmy), DateNaming::Dmy);
    }

    #[test]
    fn test_summary_message() {
        let mut summary = RunSummary {
            written: vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")],
            skipped: Vec::new(),
        };
        assert_eq!(summary_message(&summary), "Wrote 2 files");

        summary.skipped.push(PathBuf::from("c.csv"));
        assert_eq!(
            summary_message(&summary),
            "Wrote 2 files (1 already present)"
        );
    }

    #[test]
    fn test_quiet_progress_is_hidden() {
        let range = DayRange::new(0, 86_400).unwrap();
        let pb = day_progress(&range, &Market::new("x", "y"), true);
        assert!(pb.is_hidden());
    }
}
