//! Source locators for delimited flow data.
//!
//! A source is a local file, a gzip-compressed local file, or a remote
//! URL (optionally gzip-compressed). Remote fetches are a single blocking
//! request with a fixed timeout; a failed fetch fails the call.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use flate2::read::GzDecoder;
use tracing::debug;

use faf_model::{FlowError, Result};

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where a delimited flow table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowSource {
    Path(PathBuf),
    Url(String),
}

impl FlowSource {
    /// Resolve a caller-supplied locator: `http(s)://` spells a remote
    /// source, anything else a local path.
    pub fn from_spec(spec: &str) -> Self {
        if spec.starts_with("http://") || spec.starts_with("https://") {
            Self::Url(spec.to_string())
        } else {
            Self::Path(PathBuf::from(spec))
        }
    }

    fn is_gzip(&self) -> bool {
        match self {
            Self::Path(path) => path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("gz")),
            Self::Url(url) => url.ends_with(".gz"),
        }
    }

    /// Read the source into memory, transparently gunzipping `.gz`
    /// locators.
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        let raw = match self {
            Self::Path(path) => fs::read(path)?,
            Self::Url(url) => fetch(url)?,
        };
        if !self.is_gzip() {
            return Ok(raw);
        }
        debug!(bytes = raw.len(), "decompressing gzip source");
        let mut decoded = Vec::new();
        GzDecoder::new(raw.as_slice()).read_to_end(&mut decoded)?;
        Ok(decoded)
    }
}

impl From<&Path> for FlowSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for FlowSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

fn fetch(url: &str) -> Result<Vec<u8>> {
    let fetch_err = |err: reqwest::Error| FlowError::Fetch {
        url: url.to_string(),
        reason: err.to_string(),
    };
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(fetch_err)?;
    debug!(url, "fetching remote source");
    let response = client
        .get(url)
        .send()
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(fetch_err)?;
    let bytes = response.bytes().map_err(fetch_err)?;
    Ok(bytes.to_vec())
}
