//! CSV column culling for depthdump market-depth files.
//!
//! - [`CsvCuller`] - Drops columns, trims `price_size` cells, controls the header
//! - [`remove_size`] - Cuts a `price_size` cell down to the price

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/depthdump/depthdump/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cull;

pub use cull::{ASK_COLUMN, BID_COLUMN, CsvCuller, remove_size};

use depthdump_types::DepthError;
use thiserror::Error;

/// Errors that can occur while rewriting CSV files.
#[derive(Error, Debug)]
pub enum FormatError {
    /// A column named for culling is not in the header.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// CSV parsing or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<FormatError> for DepthError {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::Io(e) => Self::Io(e),
            e => Self::Format(e.to_string()),
        }
    }
}
