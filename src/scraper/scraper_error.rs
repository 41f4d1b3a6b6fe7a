use std::error::Error;
use std::fmt;

#[derive(Debug, Clone)]
pub enum ScraperError {
    Network(String),
    Blocked(String),
    HtmlParse(String),
    Io(String),
}

impl fmt::Display for ScraperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScraperError::Network(msg) => write!(f, "Network error: {msg}"),
            ScraperError::Blocked(msg) => write!(f, "Blocked by site: {msg}"),
            ScraperError::HtmlParse(msg) => write!(f, "HTML parse error: {msg}"),
            ScraperError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl Error for ScraperError {}
