//! Snapshot sources.
//!
//! A `DataSource` loads the whole ticker snapshot document on every call and
//! decodes it into raw records. Any failure here (unreachable file or host,
//! non-success HTTP status, invalid JSON) is a load failure for the refresh
//! cycle; individual malformed records are not, they are handled by the
//! pipeline.
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use ticker_common::source::is_remote;
use ticker_common::{RawTicker, Result, TrackerError};

/// Timeout applied to a single HTTP snapshot request.
const HTTP_TIMEOUT_SECS: u64 = 10;

/// Loads the raw ticker snapshot.
pub trait DataSource: Send {
    /// Fetches and decodes the full snapshot.
    fn fetch(&self) -> Result<Vec<RawTicker>>;

    /// Location of the snapshot, for logs.
    fn describe(&self) -> String;
}

/// Snapshot stored on the local filesystem.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Reads the snapshot from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for FileSource {
    fn fetch(&self) -> Result<Vec<RawTicker>> {
        let bytes = fs::read(&self.path)?;
        debug!("Read {} bytes from {}", bytes.len(), self.path.display());
        Ok(RawTicker::parse_snapshot(&bytes)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Snapshot served over HTTP(S).
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    /// Fetches the snapshot from `url` with a default client.
    pub fn new(url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self::with_client(url, client))
    }

    /// Fetches the snapshot from `url` using a preconfigured `client`.
    pub fn with_client(url: &str, client: Client) -> Self {
        Self {
            client,
            url: url.trim().to_string(),
        }
    }
}

impl DataSource for HttpSource {
    fn fetch(&self) -> Result<Vec<RawTicker>> {
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::HttpStatus(status.as_u16()));
        }
        let bytes = response.bytes()?;
        debug!("Received {} bytes from {}", bytes.len(), self.url);
        Ok(RawTicker::parse_snapshot(&bytes)?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Picks an HTTP source for `http(s)://` locations and a file source otherwise.
pub fn source_for(location: &str) -> Result<Box<dyn DataSource>> {
    if is_remote(location) {
        Ok(Box::new(HttpSource::new(location)?))
    } else {
        Ok(Box::new(FileSource::new(location.trim())))
    }
}
