/*

pypi-stats
    Top PyPI Disk Users:
    tensorflow: ...
pypi-stats --deny-list-config >> bandersnatch.conf
 */

use crate::common::DEFAULT_STATS_URL;
use crate::endpoint::Endpoint;
use clap::Parser;

#[derive(Parser)]
#[command(
    version,
    about = "Shows the packages using the most disk space on PyPI."
)]
pub struct Cli {
    /// Print a bandersnatch compatible [blacklist] section instead of the report.
    #[arg(long, alias = "bandersnatch-ini")]
    pub deny_list_config: bool,
    /// Turn on debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// Settings for one run of the driver.
#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub endpoint: Endpoint,
    pub deny_list: bool,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Config {
            url: DEFAULT_STATS_URL.to_string(),
            endpoint: Endpoint::Json,
            deny_list: cli.deny_list_config,
        }
    }
}
