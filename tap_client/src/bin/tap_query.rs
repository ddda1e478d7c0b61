//! TAP query command-line tool.
//!
//! # Usage
//!
//! ```bash
//! # Synchronous query against a preset service
//! tap-query gaia "SELECT TOP 5 source_id, ra, dec FROM gaiadr3.gaia_source"
//!
//! # Asynchronous query against any TAP endpoint
//! tap-query --async http://tapvizier.u-strasbg.fr/TAPVizieR/tap 'SELECT TOP 5 * FROM "I/239/hip_main"'
//!
//! # Resolve an object name
//! tap-query resolve M31
//! ```
//!
//! # Options
//!
//! - `--async`: run the query as a UWS job and wait for it
//! - `--config FILE`: read client settings from a TOML file
//! - `--verbose`: log requests and job progress

use anyhow::{anyhow, bail, Context, Result};
use reqwest::Url;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tap_client::display::{ExecutionTimer, LogDisplay};
use tap_client::tap::presets;
use tap_client::{ClientConfig, QueryMode, QueryResult, SesameResolver, TapService, VoTable};

const USAGE: &str = "Usage: tap-query [--async] [--verbose] [--config FILE] <vizier|gaia|URL> <ADQL>\n       tap-query [--config FILE] resolve <NAME>";

/// Rows printed after the header.
const PREVIEW_ROWS: usize = 10;

struct Args {
    mode: QueryMode,
    verbose: bool,
    config: Option<String>,
    positional: Vec<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        mode: QueryMode::Sync,
        verbose: false,
        config: None,
        positional: Vec::new(),
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--async" => args.mode = QueryMode::Async,
            "--verbose" | "-v" => args.verbose = true,
            "--config" => {
                args.config = Some(iter.next().context("--config needs a file name")?);
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            _ => args.positional.push(arg),
        }
    }

    if args.positional.len() != 2 {
        bail!("{}", USAGE);
    }
    Ok(args)
}

/// Preset name or `http://host[:port]/path` URL of a TAP service.
fn service_from(target: &str, config: ClientConfig) -> Result<TapService> {
    let service = match target {
        "vizier" => presets::tap_vizier(),
        "gaia" => presets::gaia_archive(),
        url => {
            let url = Url::parse(url).with_context(|| format!("Invalid service URL: {}", url))?;
            let host = url
                .host_str()
                .ok_or_else(|| anyhow!("Service URL has no host: {}", url))?;
            let port = url.port_or_known_default().unwrap_or(80);
            TapService::new(host, url.path().trim_end_matches('/')).with_port(port)
        }
    };
    Ok(service.with_config(config))
}

fn print_table(table: &VoTable) {
    println!("{}", table.column_names().join("\t"));
    for row in table.rows.iter().take(PREVIEW_ROWS) {
        let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        println!("{}", cells.join("\t"));
    }
    if table.num_rows() > PREVIEW_ROWS {
        println!("... ({} more rows)", table.num_rows() - PREVIEW_ROWS);
    }
    println!("{} rows, {} columns", table.num_rows(), table.num_columns());
}

fn main() -> Result<()> {
    let args = parse_args()?;

    FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    let config = match &args.config {
        Some(path) => ClientConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        None => ClientConfig::default(),
    };

    if args.positional[0] == "resolve" {
        let name = &args.positional[1];
        match SesameResolver::new(config).resolve(name)? {
            Some(position) => println!("{}\t{}\t{}", name, position.ra_deg, position.dec_deg),
            None => bail!("Sesame could not resolve '{}'", name),
        }
        return Ok(());
    }

    let service = service_from(&args.positional[0], config)?;
    let adql = &args.positional[1];
    info!("Querying {}", service.tap_endpoint());

    let display = LogDisplay;
    let timer = ExecutionTimer::start(&display);
    let table = match service.query_with(adql, args.mode)? {
        QueryResult::Table(table) => table,
        QueryResult::Job(job) => job
            .wait_for_result()
            .with_context(|| format!("Job {} failed", job.job_id().unwrap_or("?")))?,
    };
    timer.stop();

    print_table(&table);
    Ok(())
}
