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
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

const LATEST_TIME_PATTERN: &str = r"^([0-9]{4})-([0-9]{2})-([0-9]{2})T([0-9]{2}):([0-9]{2}):([0-9]{2})([+-][0-9]{2}):([0-9]{2})";

fn latest_time_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(LATEST_TIME_PATTERN).expect("latest time pattern must compile"))
}

/// Timestamp used to address a single snapshot of AMeDAS observations.
///
/// Always exactly 14 ASCII digits in the form `YYYYMMDDHHMMSS`. The only way to build
/// one is by parsing the text served by `latest_time.txt`, e.g. `2026-02-19T17:30:00+09:00`.
/// The timezone offset is required to be present but is not part of the key: snapshot
/// files are named using the local wall-clock digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey(String);

impl LookupKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for LookupKey {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let caps = latest_time_regex()
            .captures(text)
            .ok_or_else(|| ClientError::Format(text.to_owned()))?;

        // Groups 7 and 8 are the offset hours and minutes, unused.
        let key: String = (1..=6).filter_map(|i| caps.get(i)).map(|m| m.as_str()).collect();
        Ok(LookupKey(key))
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
