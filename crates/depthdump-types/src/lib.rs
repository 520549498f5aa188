//! Core types for the depthdump market-depth downloader.
//!
//! This crate provides the fundamental data structures used throughout depthdump:
//!
//! - [`DayRange`] - Inclusive range of UNIX timestamps, walked one day at a time
//! - [`DayIterator`] - Lazy day-by-day timestamp sequence
//! - [`DateNaming`] - UTC date convention used to name output files
//! - [`Market`] - Exchange and instrument pair passed to the remote API
//! - [`DepthError`] - Errors reported by the download pipeline

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/depthdump/depthdump/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod day_range;
mod error;
mod market;
mod naming;

pub use day_range::{DayIterator, DayRange, SECONDS_PER_DAY};
pub use error::{DayRangeError, DepthError, Result};
pub use market::Market;
pub use naming::{DateNaming, DateNamingParseError};
