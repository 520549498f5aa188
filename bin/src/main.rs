//! depthdump CLI - CryptoChassis market-depth history downloader.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod display;

use commands::download::DownloadArgs;
use depthdump_lib::{BID_COLUMN, url::BASE_URL};
use display::Naming;

/// Default start of the time range (2020-12-31 23:00:00 UTC).
const DEFAULT_INIT_TIME: i64 = 1_609_455_600;

#[derive(Parser)]
#[command(name = "depthdump")]
#[command(about = "Download CryptoChassis market-depth history as daily CSV files", long_about = None)]
#[command(version)]
struct Cli {
    /// UNIX timestamp of initial time
    #[arg(long, default_value_t = DEFAULT_INIT_TIME)]
    init_time: i64,

    /// UNIX timestamp of end time. Resolved through the API when omitted.
    #[arg(long)]
    end_time: Option<i64>,

    /// Exchange identifier (e.g., coinbase)
    #[arg(short, long)]
    exchange: String,

    /// Instrument identifier (e.g., btc-usd)
    #[arg(short, long)]
    instrument: String,

    /// Directory to put CSV files into
    #[arg(long)]
    dest: PathBuf,

    /// Delete header in final CSV files
    #[arg(long)]
    delete_header: bool,

    /// Column to drop (repeatable)
    #[arg(long = "cull", value_name = "COLUMN", default_value = BID_COLUMN)]
    cull: Vec<String>,

    /// Keep every column as served
    #[arg(long, conflicts_with = "cull")]
    no_cull: bool,

    /// Download days even if their CSV is already present
    #[arg(long)]
    no_skip: bool,

    /// Probe `f<date>.csv` instead of the real output when checking for existing days
    #[arg(long)]
    legacy_existence_check: bool,

    /// File naming convention
    #[arg(long, value_enum, default_value = "ymd")]
    naming: Naming,

    /// API base URL
    #[arg(long, default_value = BASE_URL)]
    base_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, default_value = "60")]
    timeout: u64,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn download_args(self) -> DownloadArgs {
        DownloadArgs {
            init_time: self.init_time,
            end_time: self.end_time,
            exchange: self.exchange,
            instrument: self.instrument,
            dest: self.dest,
            include_header: !self.delete_header,
            cull: if self.no_cull { Vec::new() } else { self.cull },
            skip_existing: !self.no_skip,
            legacy_existence_check: self.legacy_existence_check,
            naming: self.naming,
            base_url: self.base_url,
            timeout_secs: self.timeout,
            quiet: self.quiet,
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) -> Result<()> {
    let level = match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::WARN,
        (false, 1) => tracing::Level::INFO,
        (false, 2) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    };

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")
}

async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose, cli.quiet)?;
    commands::download::download(cli.download_args()).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["depthdump"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["-e", "coinbase", "-i", "btc-usd", "--dest", "out"]).download_args();
        assert_eq!(args.init_time, 1_609_455_600);
        assert_eq!(args.end_time, None);
        assert_eq!(args.exchange, "coinbase");
        assert_eq!(args.instrument, "btc-usd");
        assert_eq!(args.dest, PathBuf::from("out"));
        assert!(args.include_header);
        assert!(args.skip_existing);
        assert!(!args.legacy_existence_check);
        assert_eq!(args.cull, vec![BID_COLUMN.to_string()]);
        assert_eq!(args.base_url, BASE_URL);
        assert_eq!(args.timeout_secs, 60);
    }

    #[test]
    fn test_flags() {
        let args = parse(&[
            "--init-time",
            "1609459200",
            "--end-time",
            "1609718400",
            "--exchange",
            "binance",
            "--instrument",
            "eth-usdt",
            "--dest",
            "depth",
            "--delete-header",
            "--no-skip",
            "--naming",
            "dmy",
        ])
        .download_args();
        assert_eq!(args.init_time, 1_609_459_200);
        assert_eq!(args.end_time, Some(1_609_718_400));
        assert!(!args.include_header);
        assert!(!args.skip_existing);
        assert!(matches!(args.naming, Naming::Dmy));
    }

    #[test]
    fn test_no_cull_clears_columns() {
        let args = parse(&["-e", "x", "-i", "y", "--dest", "d", "--no-cull"]).download_args();
        assert!(args.cull.is_empty());
    }

    #[test]
    fn test_repeated_cull() {
        let args = parse(&[
            "-e", "x", "-i", "y", "--dest", "d", "--cull", "a", "--cull", "b",
        ])
        .download_args();
        assert_eq!(args.cull, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_required_arguments() {
        assert!(Cli::try_parse_from(["depthdump", "-e", "x", "-i", "y"]).is_err());
        assert!(Cli::try_parse_from(["depthdump", "-i", "y", "--dest", "d"]).is_err());
    }
}
