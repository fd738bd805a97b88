//! Input resolution: a local report path, or a URL that is downloaded first

use crate::error::BeautifyError;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Where the report will be read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Local(PathBuf),
    Remote(Url),
}

impl InputSource {
    /// Classify an argument without touching the network
    pub fn from_arg(arg: &str) -> Self {
        match parse_url(arg) {
            Some(url) => InputSource::Remote(url),
            None => InputSource::Local(PathBuf::from(arg)),
        }
    }
}

/// Syntactic URL check: http(s) scheme and a non-empty host
pub fn is_url(arg: &str) -> bool {
    parse_url(arg).is_some()
}

fn parse_url(arg: &str) -> Option<Url> {
    let url = Url::parse(arg).ok()?;
    let web = matches!(url.scheme(), "http" | "https");
    let has_host = url.host_str().is_some_and(|h| !h.is_empty());
    (web && has_host).then_some(url)
}

/// Resolve the argument to a local file, downloading it to `download_path` if it is a URL
pub fn resolve(arg: &str, download_path: &Path) -> Result<PathBuf, BeautifyError> {
    match InputSource::from_arg(arg) {
        InputSource::Local(path) => Ok(path),
        InputSource::Remote(url) => {
            fetch(&url, download_path)?;
            Ok(download_path.to_path_buf())
        }
    }
}

/// Blocking GET; the raw body replaces whatever is at `save_to`
pub fn fetch(url: &Url, save_to: &Path) -> Result<(), BeautifyError> {
    let fetch_err = |reason: String| BeautifyError::Fetch {
        url: url.to_string(),
        reason,
    };

    tracing::info!(%url, "downloading report");
    let response = reqwest::blocking::get(url.clone()).map_err(|e| fetch_err(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(fetch_err(format!("server responded {}", status)));
    }

    let body = response.bytes().map_err(|e| fetch_err(e.to_string()))?;
    fs::write(save_to, &body).map_err(|e| BeautifyError::fs("Failed to write", save_to, e))?;
    tracing::debug!(bytes = body.len(), path = %save_to.display(), "saved report");
    Ok(())
}
