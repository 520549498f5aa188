//! Rust library for downloading CryptoChassis market-depth history.
//!
//! This is a facade crate that re-exports functionality from the depthdump
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use depthdump_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::with_defaults()?;
//!     let market = Market::new("coinbase", "btc-usd");
//!     let config = PipelineConfig::new("depth").with_header(false);
//!
//!     let pipeline = Pipeline::new(client, market, config);
//!     let summary = pipeline.run(1_609_459_200, Some(1_609_718_400)).await?;
//!     println!("Wrote {} files", summary.written.len());
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/depthdump/depthdump/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use depthdump_types::*;

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use depthdump_fetch::{
    ApiClient, ClientConfig, DecompressError, DepthSource, FetchError, decompress_file,
    decompress_gzip, url,
};

// Re-export CSV culling
#[cfg(feature = "format")]
pub use depthdump_format::{ASK_COLUMN, BID_COLUMN, CsvCuller, FormatError, remove_size};

// Re-export the pipeline
#[cfg(feature = "pipeline")]
pub use depthdump_pipeline::{
    DayOutcome, DayPaths, DayReport, ExistenceCheck, Pipeline, PipelineConfig, RunSummary,
};

/// Prelude module for convenient imports.
///
/// ```
/// use depthdump_lib::prelude::*;
/// ```
pub mod prelude {
    pub use depthdump_types::{
        DateNaming, DayIterator, DayRange, DayRangeError, DepthError, Market, Result,
        SECONDS_PER_DAY,
    };

    #[cfg(feature = "fetch")]
    pub use depthdump_fetch::{ApiClient, ClientConfig, DepthSource};

    #[cfg(feature = "format")]
    pub use depthdump_format::CsvCuller;

    #[cfg(feature = "pipeline")]
    pub use depthdump_pipeline::{
        DayOutcome, DayReport, ExistenceCheck, Pipeline, PipelineConfig, RunSummary,
    };
}
