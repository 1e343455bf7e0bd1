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

use crate::key::LookupKey;
use crate::snapshot::{self, Snapshot, StationTable};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, Response, StatusCode, Url};
use std::error;
use std::fmt;

#[derive(Debug)]
pub enum ClientError {
    Transport(reqwest::Error),
    Unavailable(StatusCode, Url),
    Format(String),
    StationNotFound(String, Url),
    Encode(serde_json::Error),
}

/// Broad category of a `ClientError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The service could not be reached or did not answer with a success status.
    Unavailable,
    /// The latest time pointer was not in the expected format.
    Format,
    /// The snapshot did not contain the requested station.
    NotFound,
    /// The output document could not be rendered.
    Encode,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) | Self::Unavailable(_, _) => ErrorKind::Unavailable,
            Self::Format(_) => ErrorKind::Format,
            Self::StationNotFound(_, _) => ErrorKind::NotFound,
            Self::Encode(_) => ErrorKind::Encode,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "{}", e),
            Self::Unavailable(status, url) => write!(f, "unexpected status {} for {}", status, url),
            Self::Format(s) => write!(f, "unexpected latest_time format: {}", s),
            Self::StationNotFound(s, url) => write!(f, "station code {} not found in {}", s, url),
            Self::Encode(e) => write!(f, "unable to render snapshot: {}", e),
        }
    }
}

impl error::Error for ClientError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Encode(e) => Some(e),
            _ => None,
        }
    }
}

/// Client for the JMA AMeDAS observation data.
///
/// Timeouts are taken from the underlying `reqwest::Client`, callers should configure
/// one before building this client.
#[derive(Debug)]
pub struct AmedasClient {
    client: Client,
    base_url: Url,
}

impl AmedasClient {
    const USER_AGENT: &'static str = "amedas_snapshot (https://github.com/56quarters/amedas_snapshot)";
    const TEXT_RESPONSE: &'static str = "text/plain";
    const JSON_RESPONSE: &'static str = "application/json";

    /// Create a new client that resolves resources relative to `base_url`, e.g.
    /// `https://www.jma.go.jp/bosai/amedas/data/`.
    ///
    /// # Panics
    ///
    /// If `base_url` cannot be used as a base (a `data:` or `mailto:` URL, for example).
    pub fn new(client: Client, base_url: Url) -> Self {
        assert!(!base_url.cannot_be_a_base(), "base URL {} cannot be a base", base_url);
        AmedasClient { client, base_url }
    }

    /// Fetch the timestamp of the most recent snapshot and convert it to a `LookupKey`.
    pub async fn latest_key(&self) -> Result<LookupKey, ClientError> {
        let request_url = self.latest_time_url();
        tracing::debug!(message = "making latest time request", url = %request_url);

        let res = self.make_request(request_url, Self::TEXT_RESPONSE).await?;
        let body = res.text().await.map_err(ClientError::Transport)?;
        let key = body.parse::<LookupKey>()?;

        tracing::debug!(message = "resolved latest snapshot", key = %key);
        Ok(key)
    }

    /// Fetch the snapshot named by `key` and extract the record for `station`.
    pub async fn snapshot(&self, key: &LookupKey, station: &str) -> Result<Snapshot, ClientError> {
        let request_url = self.map_url(key);
        tracing::debug!(message = "making snapshot request", url = %request_url, station = %station);

        let res = self.make_request(request_url.clone(), Self::JSON_RESPONSE).await?;
        let table = res.json::<StationTable>().await.map_err(ClientError::Transport)?;
        tracing::debug!(message = "decoded snapshot", num_stations = table.len());

        Snapshot::from_table(
            station,
            table,
            &self.latest_time_url(),
            &request_url,
            snapshot::now_jst(),
        )
    }

    /// Resolve the latest snapshot and render the record for `station` as a JSON document.
    ///
    /// Nothing is returned unless both requests succeed and the document is fully rendered.
    pub async fn latest_document(&self, station: &str) -> Result<Vec<u8>, ClientError> {
        let key = self.latest_key().await?;
        let snapshot = self.snapshot(&key, station).await?;
        let buf = snapshot.to_pretty_json().map_err(ClientError::Encode)?;

        tracing::info!(message = "fetched latest observation", station = %station, key = %key);
        Ok(buf)
    }

    async fn make_request(&self, url: Url, accept: &'static str) -> Result<Response, ClientError> {
        let res = self
            .client
            .get(url.clone())
            .header(USER_AGENT, Self::USER_AGENT)
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = res.status();
        if status.is_success() {
            Ok(res)
        } else {
            Err(ClientError::Unavailable(status, url))
        }
    }

    pub fn latest_time_url(&self) -> Url {
        let mut url = self.base_url.clone();
        {
            url.path_segments_mut()
                .map(|mut p| {
                    p.pop_if_empty().push("latest_time.txt");
                })
                .expect("unable to modify latest time URL path segments");
        }

        url
    }

    pub fn map_url(&self, key: &LookupKey) -> Url {
        let mut url = self.base_url.clone();
        {
            url.path_segments_mut()
                .map(|mut p| {
                    p.pop_if_empty().push("map").push(&format!("{}.json", key));
                })
                .expect("unable to modify map URL path segments");
        }

        url
    }
}
