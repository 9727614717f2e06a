//! HTTP client plumbing shared by every network call.

use anyhow::{bail, Context, Result};
use reqwest::blocking::{Client, Response};
use std::io::Read;
use std::time::Duration;

pub(crate) const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
pub(crate) const HTTP_REQUEST_TIMEOUT_SECS: u64 = 60; // connection + transfer

/// Largest response body read from any endpoint.
pub(crate) const MAX_TEXT_SIZE: u64 = 1024 * 1024;

/// Create an HTTP client with connect and total request timeouts.
pub(crate) fn create_http_client() -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
        .user_agent(concat!("decent-rollback/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")
}

/// Read a text body, refusing anything larger than `max_size` bytes.
/// Checks Content-Length first, then enforces the limit while streaming.
pub(crate) fn read_text_with_limit(response: Response, max_size: u64, context: &str) -> Result<String> {
    if let Some(content_length) = response.content_length() {
        if content_length > max_size {
            bail!(
                "{context}: Content-Length {content_length} bytes exceeds maximum allowed size of {max_size} bytes"
            );
        }
    }

    let mut bytes = Vec::new();
    let read = response
        .take(max_size + 1)
        .read_to_end(&mut bytes)
        .with_context(|| format!("{context}: Failed to read response body"))?;
    if read as u64 > max_size {
        bail!("{context}: Response exceeds maximum allowed size of {max_size} bytes");
    }

    String::from_utf8(bytes).with_context(|| format!("{context}: Response contains invalid UTF-8"))
}
