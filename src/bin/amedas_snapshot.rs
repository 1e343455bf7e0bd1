// amedas_snapshot - Fetch the latest AMeDAS observation from jma.go.jp
//
// Copyright 2026 Nick Pillitteri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

use amedas_snapshot::client::AmedasClient;
use clap::Parser;
use reqwest::{Client, Url};
use std::error::Error;
use std::io::{self, Write};
use std::process;
use std::time::Duration;
use tracing::{Instrument, Level};

const DEFAULT_LOG_LEVEL: Level = Level::WARN;
const DEFAULT_TIMEOUT_MILLIS: u64 = 10_000;
const DEFAULT_STATION: &str = "44132";
const DEFAULT_API_URL: &str = "https://www.jma.go.jp/bosai/amedas/data/";

#[derive(Debug, Parser)]
#[clap(name = "amedas_snapshot", version = clap::crate_version!())]
struct AmedasSnapshotApplication {
    /// AMeDAS station code to fetch the latest observation for
    #[clap(long, default_value_t = DEFAULT_STATION.into())]
    station: String,

    /// Base URL for JMA AMeDAS data
    #[clap(long, default_value_t = DEFAULT_API_URL.into())]
    api_url: String,

    /// Logging verbosity. Allowed values are 'trace', 'debug', 'info', 'warn', and 'error'
    /// (case insensitive)
    #[clap(long, default_value_t = DEFAULT_LOG_LEVEL)]
    log_level: Level,

    /// Timeout for each request to the JMA API, in milliseconds.
    #[clap(long, default_value_t = DEFAULT_TIMEOUT_MILLIS)]
    timeout_millis: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let opts = AmedasSnapshotApplication::parse();
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(opts.log_level)
            .with_writer(io::stderr)
            .finish(),
    )
    .expect("failed to set tracing subscriber");

    let base_url = match Url::parse(&opts.api_url) {
        Ok(u) if !u.cannot_be_a_base() => u,
        Ok(u) => {
            tracing::error!(message = "API URL cannot be used as a base", api_url = %u);
            process::exit(1)
        }
        Err(e) => {
            tracing::error!(message = "invalid API URL", api_url = %opts.api_url, error = %e);
            process::exit(1)
        }
    };

    let timeout = Duration::from_millis(opts.timeout_millis);
    let http_client = Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
        tracing::error!(message = "unable to initialize HTTP client", error = %e);
        process::exit(1)
    });

    let client = AmedasClient::new(http_client, base_url);
    let buf = client
        .latest_document(&opts.station)
        .instrument(tracing::span!(Level::DEBUG, "amedas_snapshot"))
        .await
        .unwrap_or_else(|e| {
            tracing::error!(message = "failed to fetch latest observation", station = %opts.station, error = %e);
            process::exit(1)
        });

    let mut stdout = io::stdout().lock();
    stdout.write_all(&buf)?;
    stdout.flush()?;

    Ok(())
}
