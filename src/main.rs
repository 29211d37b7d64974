mod aggregate;
mod cli;
mod common;
mod endpoint;
mod fetch;
mod html_table;
mod json_stats;
mod logging;
mod render;

use clap::Parser;
use cli::{Cli, Config};
use common::Error;
use fetch::Fetcher;
use log::{error, info};
use std::io::{self, Write};
use std::process;

/// Exit code for failures other than missing data: bad response body,
/// degenerate totals, I/O errors.
const EXIT_FAILURE: i32 = 70;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Outcome {
    Success,
    /// The endpoint returned nothing usable.
    NoData,
    /// The response parsed but listed no packages.
    NoEntries,
}

impl Outcome {
    fn exit_code(self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::NoData => 1,
            Outcome::NoEntries => 69,
        }
    }
}

async fn run<W: Write>(
    config: &Config,
    fetcher: &Fetcher,
    out: &mut W,
) -> common::Result<Outcome> {
    let snapshot = match config.endpoint.fetch_stats(fetcher, &config.url).await? {
        Some(snapshot) => snapshot,
        None => {
            error!("Unable to get stats from {}. Exiting", config.url);
            return Ok(Outcome::NoData);
        }
    };
    if snapshot.is_empty() {
        error!("Didn't get valid package size stats from {}", config.url);
        return Ok(Outcome::NoEntries);
    }

    if config.deny_list {
        render::write_deny_list(out, &snapshot)?;
    } else {
        let summary = aggregate::summarize(&snapshot)?;
        render::write_report(out, &snapshot, &summary)?;
    }
    out.flush()?;
    Ok(Outcome::Success)
}

fn try_main(config: &Config) -> anyhow::Result<Outcome> {
    let rt = tokio::runtime::Runtime::new().map_err(|e| Error::CreateRuntime(e))?;
    let fetcher = Fetcher::new()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = rt.block_on(run(config, &fetcher, &mut out))?;
    Ok(outcome)
}

fn exit_code(result: &anyhow::Result<Outcome>) -> i32 {
    match result {
        Ok(outcome) => outcome.exit_code(),
        Err(_) => EXIT_FAILURE,
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.debug);
    info!("Starting {}", std::env::args().next().unwrap_or_default());

    let result = try_main(&Config::from_cli(&cli));
    if let Err(error) = &result {
        let mut msg = format!("{}", error);
        for cause in error.chain().skip(1) {
            msg += &format!("\n\tCaused by: {}", cause);
        }
        error!("{}", msg);
    }
    process::exit(exit_code(&result));
}
