use async_trait::async_trait;
use std::path::Path;
use tokio::sync::OnceCell;

use crate::domain::UnitSnapshot;
use crate::scraper::units::{extract_title, extract_units};
use crate::scraper::ScraperError;

/// The page the tracker is looking at: its address plus the two
/// extractions run against it.
#[async_trait]
pub trait PageSource: Send + Sync {
    fn url(&self) -> &str;

    async fn title(&self) -> Result<Option<String>, ScraperError>;

    async fn units(&self) -> Result<UnitSnapshot, ScraperError>;
}

/// A listing page whose HTML is already in memory.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    url: String,
    html: String,
}

impl HtmlPage {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }

    /// Loads a saved copy of a page, attributed to `url`.
    pub async fn from_file(url: impl Into<String>, path: &Path) -> Result<Self, ScraperError> {
        let html = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ScraperError::Io(format!("{}: {e}", path.display())))?;
        Ok(Self::new(url, html))
    }
}

#[async_trait]
impl PageSource for HtmlPage {
    fn url(&self) -> &str {
        &self.url
    }

    async fn title(&self) -> Result<Option<String>, ScraperError> {
        extract_title(&self.html)
    }

    async fn units(&self) -> Result<UnitSnapshot, ScraperError> {
        extract_units(&self.html)
    }
}

/// Where a remote page's HTML comes from.
#[async_trait]
pub trait HtmlSource: Send + Sync {
    async fn load(&self, url: &str) -> Result<String, ScraperError>;
}

/// A page downloaded on first use. Nothing is fetched until an extraction
/// runs, and both extractions share the one attempt, failed or not.
pub struct RemotePage<L> {
    url: String,
    loader: L,
    html: OnceCell<Result<String, ScraperError>>,
}

impl<L: HtmlSource> RemotePage<L> {
    pub fn new(url: impl Into<String>, loader: L) -> Self {
        Self {
            url: url.into(),
            loader,
            html: OnceCell::new(),
        }
    }

    async fn html(&self) -> Result<&str, ScraperError> {
        match self.html.get_or_init(|| self.loader.load(&self.url)).await {
            Ok(html) => Ok(html),
            Err(e) => Err(e.clone()),
        }
    }
}

#[async_trait]
impl<L: HtmlSource> PageSource for RemotePage<L> {
    fn url(&self) -> &str {
        &self.url
    }

    async fn title(&self) -> Result<Option<String>, ScraperError> {
        extract_title(self.html().await?)
    }

    async fn units(&self) -> Result<UnitSnapshot, ScraperError> {
        extract_units(self.html().await?)
    }
}
