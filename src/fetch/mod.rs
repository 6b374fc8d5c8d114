//! HTTP retrieval of the incident dataset.
//!
//! A single GET with no retries: an unreachable endpoint or a non-success
//! status halts the run.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};

/// Fetches the body bytes of `url` via a single GET request.
///
/// # Errors
///
/// Returns an error on connection failure, an invalid URL, or a non-2xx
/// response status.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse().with_context(|| format!("invalid URL {url:?}"))?,
    );

    let resp = client
        .execute(req)
        .await
        .with_context(|| format!("fetching {url}"))?
        .error_for_status()?;

    Ok(resp.bytes().await?.to_vec())
}
