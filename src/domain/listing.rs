// src/domain/listing.rs

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::TrackerError;

pub const LISTING_HOST: &str = "teduh.kpkt.gov.my";
pub const LISTING_PATH: &str = "unit-project-swasta";
const UNTITLED: &str = "Untitled";

/// One row of the visited-listings dropdown.
/// `url` is always stored normalized and is unique within the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub url: String,
    pub title: String,
}

impl ListingEntry {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }

    /// Returns the entry with both fields normalized.
    pub fn normalized(&self) -> Self {
        Self {
            url: normalize_url(&self.url).to_string(),
            title: normalize_title(&self.title),
        }
    }
}

/// Everything before the first `?`, or the whole string.
pub fn normalize_url(url: &str) -> &str {
    match url.find('?') {
        Some(idx) => &url[..idx],
        None => url,
    }
}

/// Repairs titles shaped like `Base (code?query)` into `Base (code)`.
/// Titles without a trailing bracketed code are returned untouched.
pub fn normalize_title(title: &str) -> String {
    let Some(inner) = title.strip_suffix(')') else {
        return title.to_string();
    };
    let Some(open) = inner.rfind(" (") else {
        return title.to_string();
    };

    let base = &inner[..open];
    let code = &inner[open + 2..];
    format!("{base} ({})", normalize_url(code))
}

/// Extracts the APDL code from a listing URL, or `None` for any page
/// that is not a unit listing.
pub fn apdl_code(raw_url: &str) -> Option<String> {
    let parsed = Url::parse(raw_url).ok()?;
    if parsed.scheme() != "https" || parsed.host_str() != Some(LISTING_HOST) {
        return None;
    }

    let mut segments = parsed.path_segments()?;
    if segments.next() != Some(LISTING_PATH) {
        return None;
    }

    segments
        .next()
        .filter(|code| !code.is_empty())
        .map(|code| code.to_string())
}

/// Builds the listing URL for a manually entered APDL code.
pub fn link_for_code(code: &str) -> Result<String, TrackerError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(TrackerError::BadRequest("APDL code is empty".into()));
    }
    Ok(format!("https://{LISTING_HOST}/{LISTING_PATH}/{code}"))
}

/// The title stored for a listing: page title followed by its code in brackets.
pub fn display_title(page_title: Option<&str>, code: &str) -> String {
    let title = page_title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(UNTITLED);
    format!("{title} ({})", normalize_url(code))
}
