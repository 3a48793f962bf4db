// src/crawl/fetch.rs
// =============================================================================
// Fetching pages over HTTP.
//
// The crawl loop only talks to the Fetcher trait. HttpFetcher is the real
// implementation (reqwest); tests plug in an in-memory one.
//
// Status handling:
// - anything below 500 (including 404) is a successful fetch: the page is
//   analyzed and its status recorded
// - 500 and up, and every network-level failure, is a FetchError
// =============================================================================

use crate::config::AnalysisConfig;
use crate::error::FetchError;
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::error::Error as StdError;
use std::io;
use std::time::Duration;

/// A fetched document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub html: String,
}

/// Something that can fetch a URL
///
/// Returns a boxed future so the trait stays object safe.
pub trait Fetcher: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<FetchedPage, FetchError>>;
}

/// reqwest-backed fetcher configured from an AnalysisConfig
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &AnalysisConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self.client.get(url).send().await.map_err(categorize_error)?;

        let status = response.status().as_u16();
        if status >= 500 {
            return Err(FetchError::Status(status));
        }

        let html = response.text().await.map_err(categorize_error)?;
        Ok(FetchedPage { status, html })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<FetchedPage, FetchError>> {
        self.get(url).boxed()
    }
}

// Sorts a reqwest error into the failure kinds we report
//
// reqwest wraps hyper, which wraps std::io errors, so we walk the source
// chain looking for an io::ErrorKind before falling back to the message.
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        return FetchError::Timeout;
    }

    let message = error_chain_message(&error);

    if let Some(kind) = io_error_kind(&error) {
        match kind {
            io::ErrorKind::TimedOut => return FetchError::Timeout,
            io::ErrorKind::ConnectionRefused => return FetchError::ConnectionRefused(message),
            io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted => {
                return FetchError::ConnectionReset(message)
            }
            _ => {}
        }
    }

    if let Some(status) = error.status() {
        return FetchError::Status(status.as_u16());
    }

    classify_message(error.is_connect(), message)
}

// Fallback when the io error kind isn't available
fn classify_message(is_connect: bool, message: String) -> FetchError {
    let lower = message.to_lowercase();
    if lower.contains("dns") || lower.contains("failed to lookup") || lower.contains("resolve") {
        FetchError::Dns(message)
    } else if lower.contains("connection refused") {
        FetchError::ConnectionRefused(message)
    } else if lower.contains("connection reset") {
        FetchError::ConnectionReset(message)
    } else if lower.contains("timed out") {
        FetchError::Timeout
    } else if is_connect {
        FetchError::ConnectionRefused(message)
    } else {
        FetchError::Other(message)
    }
}

fn io_error_kind(error: &(dyn StdError + 'static)) -> Option<io::ErrorKind> {
    let mut source = error.source();
    while let Some(err) = source {
        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            return Some(io_err.kind());
        }
        source = err.source();
    }
    None
}

// "error sending request: ...: dns error: ..." for the whole chain
//
// reqwest and hyper already print their sources in Display, so a source whose
// text is already part of the message is skipped.
fn error_chain_message(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(err) = source {
        let text = err.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = err.source();
    }
    message
}
