//! Loading dataset bytes from a local path or an HTTP(S) URL.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use tracing::debug;

/// Downloads `url` and returns the response body. Non-success statuses are errors.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?.error_for_status()?;
    let bytes = resp.bytes().await?.to_vec();
    debug!(url, bytes = bytes.len(), "Fetched dataset");
    Ok(bytes)
}

/// Reads `source` from disk, or fetches it when it looks like a URL.
#[tracing::instrument(skip(client))]
pub async fn load_source<C: HttpClient>(client: &C, source: &str) -> Result<Vec<u8>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        fetch_bytes(client, source).await
    } else {
        std::fs::read(source).with_context(|| format!("failed to read {source}"))
    }
}
