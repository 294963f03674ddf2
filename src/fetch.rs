use std::time::{Duration, Instant};

use reqwest::redirect::Policy;
use thiserror::Error;
use tracing::debug;

use crate::settings::Settings;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("CONNECTION ERROR: connection to {url} was refused. Double-check that you have the correct URL.")]
    ConnectionRefused { url: String },
    #[error("TIMEOUT ERROR: the request to {url} timed out. Re-run the program to try again.")]
    Timeout { url: String },
    #[error("TOO MANY REDIRECTS ERROR: {url} is most likely bad. Try a new one.")]
    TooManyRedirects { url: String },
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        source: reqwest::Error,
    },
}

impl FetchError {
    fn classify(url: &str, e: reqwest::Error) -> Self {
        let url = url.to_string();
        if e.is_timeout() {
            FetchError::Timeout { url }
        } else if e.is_redirect() {
            FetchError::TooManyRedirects { url }
        } else if e.is_connect() {
            FetchError::ConnectionRefused { url }
        } else if let Some(status) = e.status() {
            FetchError::Status { url, status: status.as_u16() }
        } else {
            FetchError::Request { url, source: e }
        }
    }
}

/// Source of raw page markup.
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(settings: &Settings) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .redirect(Policy::limited(settings.max_redirects))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| FetchError::classify(url, e))?;
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::classify(url, e))?;
        debug!(url, bytes = body.len(), latency_ms = start.elapsed().as_millis() as u64, "Fetched page");
        Ok(body)
    }
}
