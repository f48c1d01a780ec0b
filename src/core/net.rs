// src/core/net.rs

// Blocking HTTP GET with a bounded timeout.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::consts::{FETCH_TIMEOUT_SECS, USER_AGENT};
use crate::error::ScrapeError;

/// Where result pages come from. The runner injects one; tests use canned HTML.
pub trait PageSource {
    fn get(&self, url: &str) -> Result<String, ScrapeError>;
}

pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new() -> Result<Self, ScrapeError> {
        Self::with_timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ScrapeError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|source| ScrapeError::Fetch { url: s!("<client>"), source })?;
        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    fn get(&self, url: &str) -> Result<String, ScrapeError> {
        let t = Instant::now();
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|source| ScrapeError::Fetch { url: s!(url), source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Status { url: s!(url), status: status.as_u16() });
        }
        let body = resp
            .text()
            .map_err(|source| ScrapeError::Fetch { url: s!(url), source })?;
        debug!(url, bytes = body.len(), elapsed = ?t.elapsed(), "fetched page");
        Ok(body)
    }
}
