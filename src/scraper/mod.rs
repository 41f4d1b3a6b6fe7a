mod fetch;
mod page;
mod scraper_error;
pub mod units;

pub use fetch::PageFetcher;
pub use page::{HtmlPage, HtmlSource, PageSource, RemotePage};
pub use scraper_error::ScraperError;
