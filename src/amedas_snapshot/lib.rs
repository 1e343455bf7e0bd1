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

//! Fetch the latest AMeDAS observation for a single station from jma.go.jp
//!
//! ## Features
//!
//! `amedas_snapshot` fetches the most recent observations published by the Japan Meteorological
//! Agency [AMeDAS] network and prints the record for a single station as JSON. This is done in
//! two requests:
//!
//! * `latest_time.txt` - Timestamp of the most recent snapshot, e.g. `2026-02-19T17:30:00+09:00`.
//! * `map/$YYYYMMDDHHMMSS.json` - Observations for every station at that time, keyed by station code.
//!
//! The record for the requested station is copied as-is into the output along with the URLs
//! it was fetched from and the time it was fetched (UTC+9).
//!
//! [AMeDAS]: https://www.jma.go.jp/bosai/amedas/
//!
//! ## Build
//!
//! `amedas_snapshot` is a Rust program and must be built from source using a
//! [Rust toolchain](https://rustup.rs/).
//!
//! ```text
//! git clone git@github.com:56quarters/amedas_snapshot.git && cd amedas_snapshot
//! cargo build --release
//! ```
//!
//! ## Usage
//!
//! By default, observations for station `44132` (Tokyo) are fetched. Pick a different station
//! with the `--station` flag. Station codes are listed in the AMeDAS station table.
//!
//! ```text
//! curl -sS 'https://www.jma.go.jp/bosai/amedas/const/amedastable.json' | jq | less
//! ```
//!
//! Then run `amedas_snapshot` for that station.
//!
//! ```text
//! ./amedas_snapshot --station 62078
//! ```
//!
//! Output is written to stdout and looks like the following. Logs are written to stderr.
//!
//! ```json
//! {
//!   "station_code": "44132",
//!   "source": {
//!     "latest_time_url": "https://www.jma.go.jp/bosai/amedas/data/latest_time.txt",
//!     "map_url": "https://www.jma.go.jp/bosai/amedas/data/map/20260219173000.json",
//!     "fetched_at": "2026-02-19T17:31:04.123456+09:00"
//!   },
//!   "data": {
//!     "temp": [5.2, 0]
//!   }
//! }
//! ```
//!

pub mod client;
pub mod key;
pub mod snapshot;
