//! Download command implementation.
//!
//! This module wires the command-line options into the API client and the
//! day-by-day pipeline, and reports progress while days are written.

use crate::display::{Naming, day_progress, summary_message};
use anyhow::{Context, Result};
use depthdump_lib::prelude::*;
use std::path::PathBuf;
use std::time::Duration;

/// Options for a download run, as collected from the command line.
#[derive(Debug)]
pub(crate) struct DownloadArgs {
    pub(crate) init_time: i64,
    pub(crate) end_time: Option<i64>,
    pub(crate) exchange: String,
    pub(crate) instrument: String,
    pub(crate) dest: PathBuf,
    pub(crate) include_header: bool,
    pub(crate) cull: Vec<String>,
    pub(crate) skip_existing: bool,
    pub(crate) legacy_existence_check: bool,
    pub(crate) naming: Naming,
    pub(crate) base_url: String,
    pub(crate) timeout_secs: u64,
    pub(crate) quiet: bool,
}

impl DownloadArgs {
    fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            ..Default::default()
        }
    }

    fn pipeline_config(&self) -> PipelineConfig {
        let existence_check = if self.legacy_existence_check {
            ExistenceCheck::LegacyPrefixed
        } else {
            ExistenceCheck::Output
        };

        PipelineConfig::new(&self.dest)
            .with_header(self.include_header)
            .with_cull_columns(self.cull.iter().cloned())
            .with_skip_existing(self.skip_existing)
            .with_existence_check(existence_check)
            .with_naming(self.naming.into())
    }
}

/// Download every day in the requested range into `args.dest`.
pub(crate) async fn download(args: DownloadArgs) -> Result<()> {
    let client = ApiClient::new(args.client_config()).context("Failed to create HTTP client")?;
    let market = Market::new(&args.exchange, &args.instrument);
    let pipeline = Pipeline::new(client, market, args.pipeline_config());

    let range = pipeline
        .resolve_range(args.init_time, args.end_time)
        .await
        .context("Failed to resolve time range")?;

    let progress = day_progress(&range, pipeline.market(), args.quiet);
    let summary = pipeline
        .run_range(range, |report| {
            if let Some(name) = report.path.file_name() {
                progress.set_message(name.to_string_lossy().into_owned());
            }
            progress.inc(1);
        })
        .await;

    let summary = match summary {
        Ok(summary) => summary,
        Err(err) => {
            progress.abandon();
            return Err(err).context("Download failed");
        }
    };
    progress.finish_with_message(summary_message(&summary));

    if !args.quiet {
        println!("Output written to: {}", args.dest.display());
    }

    Ok(())
}
