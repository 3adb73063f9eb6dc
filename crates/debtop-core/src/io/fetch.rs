//! Fetch gateway for Contents indices.
//!
//! One attempt, no retries: the request either yields a streamable body or
//! one of three classified failures (`NotFound`, `Remote`, `Transport`).
//! The underlying cause is reported through the injected [`Diagnostics`]
//! handle and kept as a `source` on the error, but callers match on the
//! classification, never on reqwest internals.

use std::time::Duration;

use bytes::Bytes;
use futures::Stream;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::arch::Arch;
use crate::diag::Diagnostics;

/// Default Debian mirror base URL.
pub const DEFAULT_MIRROR: &str = "http://ftp.uk.debian.org/debian";

/// Default connect/read timeout for mirror requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Classified failure of a Contents index fetch.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The mirror answered 404: no Contents index at this path.
    #[error("contents index not found on the mirror: {url}")]
    NotFound {
        /// Address that was requested.
        url: String,
    },

    /// The mirror was reachable but answered with a non-success status.
    #[error("mirror returned HTTP {status} for {url}")]
    Remote {
        /// Status the mirror answered with.
        status: StatusCode,
        /// Address that was requested.
        url: String,
    },

    /// The request could not be completed at all (DNS, refused connection,
    /// timeout, TLS).
    #[error("request to {url} failed: {source}")]
    Transport {
        /// Address that was requested.
        url: String,
        /// Underlying transport failure.
        source: reqwest::Error,
    },
}

/// Build an HTTP client with connect and read timeouts.
///
/// Deliberately not a whole-request deadline: the body of a Contents index
/// is streamed through the parser and a legitimate run can take longer
/// than any sane total timeout. A stalled mirror still trips `read_timeout`.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .connect_timeout(timeout)
        .read_timeout(timeout)
        .build()
}

/// Resource address for the Contents index of `arch` on `mirror`.
///
/// The architecture is substituted verbatim; a trailing slash on the
/// mirror is tolerated.
pub fn contents_url(mirror: &str, arch: Arch) -> String {
    format!(
        "{}/dists/stable/main/Contents-{arch}.gz",
        mirror.trim_end_matches('/')
    )
}

/// Fetch the Contents index for `arch`, returning the raw compressed body
/// as a byte stream.
///
/// The body is never materialized here; decompression and parsing happen
/// downstream while the transfer is still in flight. Every failure is
/// reported through `diag` at error severity before the classified
/// [`FetchError`] is returned.
pub async fn fetch_contents<D: Diagnostics>(
    client: &Client,
    mirror: &str,
    arch: Arch,
    diag: &D,
) -> Result<impl Stream<Item = reqwest::Result<Bytes>> + Unpin, FetchError> {
    let url = contents_url(mirror, arch);
    tracing::debug!("fetching contents index: {url}");

    let response = match client
        .get(&url)
        .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
        .send()
        .await
    {
        Ok(response) => response,
        Err(source) => {
            diag.error(&format!("request to {url} failed: {source}"));
            return Err(FetchError::Transport { url, source });
        }
    };

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        diag.error(&format!("contents index not found on the mirror: {url}"));
        return Err(FetchError::NotFound { url });
    }
    if !status.is_success() {
        diag.error(&format!("mirror returned HTTP {status} for {url}"));
        return Err(FetchError::Remote { status, url });
    }

    Ok(response.bytes_stream())
}
