// fetch.rs
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, StatusCode};
use std::time::Duration;

use async_trait::async_trait;

use crate::scraper::{HtmlSource, ScraperError};

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

/// Downloads listing pages so they can be scraped like an open tab.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/html,application/xhtml+xml"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("ms-MY,en;q=0.8"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HtmlSource for PageFetcher {
    /// Single attempt, no retry; the next run simply tries again.
    async fn load(&self, url: &str) -> Result<String, ScraperError> {
        tracing::info!(url, "fetching listing page");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ScraperError::Blocked(format!("HTTP {status} for {url}")));
        }
        if !status.is_success() {
            return Err(ScraperError::Network(format!("HTTP {status} for {url}")));
        }

        resp.text()
            .await
            .map_err(|e| ScraperError::Network(e.to_string()))
    }
}
