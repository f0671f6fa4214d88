// src/core/net.rs
// Page fetching. The crawl loop only sees the `Fetch` trait so tests and
// offline runs can hand it pages without touching the network.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::consts::{TIMEOUT_SECS, USER_AGENT};
use crate::error::{Result, ScrapeError};

pub trait Fetch: Sync {
    /// Return the body of `url`, or an error for anything but a 2xx response.
    fn fetch(&self, url: &str) -> Result<String>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Http(format!("{} {}", status, url)));
        }
        Ok(resp.text()?)
    }
}
