//! HTTP client, gzip decompression and API bindings for depthdump.
//!
//! This crate provides the network side of the download pipeline:
//!
//! - [`url::trade_url`] / [`url::market_depth_url`] - Constructs API endpoint URLs
//! - [`ApiClient`] - HTTP client resolving end times, file URLs and payloads
//! - [`DepthSource`] - Trait the pipeline uses to reach the API
//! - [`decompress_gzip`] / [`decompress_file`] - In-memory gzip decompression

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/depthdump/depthdump/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod decompress;
mod response;
mod source;
pub mod url;

pub use client::{ApiClient, ClientConfig, FetchError};
pub use decompress::{DecompressError, decompress_file, decompress_gzip};
pub use response::{Timestamp, UrlEntry, UrlsResponse};
pub use source::DepthSource;
