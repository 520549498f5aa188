//! Day-by-day download pipeline for depthdump.
//!
//! - [`PipelineConfig`] - Destination, skip, culling, header and naming options
//! - [`ExistenceCheck`] - How the "already present" probe locates a day's file
//! - [`Pipeline`] - Resolves the range and materializes one CSV per day
//! - [`RunSummary`] / [`DayReport`] - What a run produced

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/depthdump/depthdump/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod pipeline;

pub use config::{DayPaths, ExistenceCheck, PipelineConfig};
pub use pipeline::{DayOutcome, DayReport, Pipeline, RunSummary};
