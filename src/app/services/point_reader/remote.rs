//! Remote source fetching
//!
//! Downloads the full text body of an absolute http(s) URI in a single
//! synchronous call and hands it to the delimited-text adapter. Network and
//! HTTP failures are fatal to the import, distinct from per-row failures.

use reqwest::Url;
use std::time::Instant;
use tracing::info;

use crate::{Error, Result};

/// Interpret a source string as a remote URI.
///
/// Only syntactically valid absolute http(s) URIs qualify; everything else
/// is treated as a local path by the caller.
pub fn parse_remote_url(source: &str) -> Option<Url> {
    let url = Url::parse(source).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

/// Download the full text body of a remote source
pub fn fetch_text(url: &Url) -> Result<String> {
    info!("Fetching data from {} ...", url);
    let started = Instant::now();

    let response = reqwest::blocking::get(url.clone())
        .map_err(|error| Error::fetch(url.as_str(), "request failed", Some(error)))?;

    let response = response.error_for_status().map_err(|error| {
        let status = error
            .status()
            .map(|status| status.to_string())
            .unwrap_or_else(|| "unknown status".to_string());
        Error::fetch(url.as_str(), status, Some(error))
    })?;

    let text = response
        .text()
        .map_err(|error| Error::fetch(url.as_str(), "failed to read body", Some(error)))?;

    info!("Fetched {} bytes in {:.2?}.", text.len(), started.elapsed());

    Ok(text)
}
