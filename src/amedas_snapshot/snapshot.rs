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

use crate::client::ClientError;
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use reqwest::Url;
use serde::Serialize;
use serde_json::{Map, Value};

const JST_OFFSET_SECS: i32 = 9 * 3600;

/// Observations for every station in a single snapshot, keyed by station code.
pub type StationTable = Map<String, Value>;

/// Latest observation for a single station along with where and when it was fetched.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub station_code: String,
    pub source: Source,
    pub data: Value,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Source {
    pub latest_time_url: String,
    pub map_url: String,
    pub fetched_at: String,
}

impl Snapshot {
    /// Pull the record for `station` out of `table`, copying it as-is.
    ///
    /// Returns `ClientError::StationNotFound` with the station and `map_url` if the
    /// snapshot has no entry for the station.
    pub fn from_table(
        station: &str,
        mut table: StationTable,
        latest_time_url: &Url,
        map_url: &Url,
        fetched_at: DateTime<FixedOffset>,
    ) -> Result<Self, ClientError> {
        let data = table
            .remove(station)
            .ok_or_else(|| ClientError::StationNotFound(station.to_owned(), map_url.clone()))?;

        Ok(Snapshot {
            station_code: station.to_owned(),
            source: Source {
                latest_time_url: latest_time_url.to_string(),
                map_url: map_url.to_string(),
                fetched_at: fetched_at.to_rfc3339_opts(SecondsFormat::Micros, false),
            },
            data,
        })
    }

    /// Render as indented JSON with a trailing newline. Non-ASCII text is left unescaped.
    pub fn to_pretty_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut buf = serde_json::to_vec_pretty(self)?;
        buf.push(b'\n');
        Ok(buf)
    }
}

/// Current wall-clock time at UTC+9, the offset JMA publishes in.
pub fn now_jst() -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(JST_OFFSET_SECS).expect("UTC+9 is a valid offset");
    Utc::now().with_timezone(&offset)
}
