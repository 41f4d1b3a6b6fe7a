use std::collections::HashSet;
use std::sync::Arc;

use crate::db::{get_or_default, put, KeyValueStore, VISITED_URLS_KEY};
use crate::domain::listing::normalize_url;
use crate::domain::ListingEntry;
use crate::errors::TrackerResult;

/// Outcome of a cleanup pass over the visited listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    /// The corrected list, in original order.
    pub entries: Vec<ListingEntry>,
    /// Entries whose url or title was rewritten.
    pub normalized: usize,
    /// Later duplicates that were discarded.
    pub dropped: usize,
    pub written: bool,
}

impl CleanupReport {
    pub fn changed(&self) -> bool {
        self.normalized > 0 || self.dropped > 0
    }
}

/// Ordered, url-unique list of listings the user has opened.
pub struct VisitedListings {
    store: Arc<dyn KeyValueStore>,
}

impl VisitedListings {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Entries in stored (oldest-first) order.
    pub async fn list(&self) -> TrackerResult<Vec<ListingEntry>> {
        get_or_default(self.store.as_ref(), VISITED_URLS_KEY).await
    }

    /// Appends the listing unless its normalized url is already present.
    /// The first stored title always wins. Returns whether a write happened.
    pub async fn upsert(&self, url: &str, title: &str) -> TrackerResult<bool> {
        let url = normalize_url(url);
        let mut entries = self.list().await?;
        if entries.iter().any(|entry| entry.url == url) {
            return Ok(false);
        }

        entries.push(ListingEntry::new(url, title));
        put(self.store.as_ref(), VISITED_URLS_KEY, &entries).await?;
        tracing::info!(url, title, "recorded visited listing");
        Ok(true)
    }

    /// Normalizes every entry and drops later duplicates by url.
    /// The list is written back only when something changed, so running the
    /// pass on its own output issues no write.
    pub async fn cleanup(&self) -> TrackerResult<CleanupReport> {
        let stored = self.list().await?;
        let report = cleanup_entries(&stored);

        if !report.changed() {
            return Ok(report);
        }

        put(self.store.as_ref(), VISITED_URLS_KEY, &report.entries).await?;
        tracing::info!(
            normalized = report.normalized,
            dropped = report.dropped,
            "cleaned visited listings"
        );
        Ok(CleanupReport {
            written: true,
            ..report
        })
    }
}

/// The pure part of the cleanup pass.
pub fn cleanup_entries(stored: &[ListingEntry]) -> CleanupReport {
    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(stored.len());
    let mut normalized = 0;
    let mut dropped = 0;

    for entry in stored {
        let clean = entry.normalized();
        if !seen.insert(clean.url.clone()) {
            dropped += 1;
            continue;
        }
        if &clean != entry {
            normalized += 1;
        }
        entries.push(clean);
    }

    CleanupReport {
        entries,
        normalized,
        dropped,
        written: false,
    }
}
