//! One activation of the tracker against a page.
//!
//! Every step is awaited in order. A failing store call is logged and the
//! session carries on with whatever it already has; nothing is retried and
//! nothing written earlier in the session is rolled back.

mod view;

pub use view::{ListingView, PopupView};

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::db::{
    CleanupReport, CountHistory, KeyValueStore, NewlySoldUnits, UnitStatusHistory, VisitedListings,
};
use crate::domain::listing::{apdl_code, display_title, normalize_url};
use crate::domain::{
    detect_at, ListingEntry, SoldTransitionRecord, UnitCounts, UnitSnapshot, UnitStatus,
};
use crate::errors::{TrackerError, TrackerResult};
use crate::scraper::PageSource;

pub struct PopupSession {
    visited: VisitedListings,
    counts: CountHistory,
    statuses: UnitStatusHistory,
    newly_sold: NewlySoldUnits,
}

/// Logs a failed step and substitutes a fallback value.
fn or_log<T>(result: TrackerResult<T>, step: &str, fallback: T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(step, error = %e, "store operation failed");
            fallback
        }
    }
}

impl PopupSession {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            visited: VisitedListings::new(store.clone()),
            counts: CountHistory::new(store.clone()),
            statuses: UnitStatusHistory::new(store.clone()),
            newly_sold: NewlySoldUnits::new(store),
        }
    }

    pub async fn activate(&self, page: &dyn PageSource) -> PopupView {
        self.activate_at(page, Utc::now()).await
    }

    pub async fn activate_at(&self, page: &dyn PageSource, now: DateTime<Utc>) -> PopupView {
        // Cleanup must finish before anything reads the dropdown.
        if let Err(e) = self.visited.cleanup().await {
            tracing::error!(error = %e, "cleanup of visited listings failed");
        }

        let Some(code) = apdl_code(page.url()) else {
            tracing::info!(url = page.url(), "not a unit listing page");
            return PopupView::Unrecognized {
                url: page.url().to_string(),
                visited: self.visited().await,
            };
        };
        let url = normalize_url(page.url()).to_string();

        let title = match page.title().await {
            Ok(title) => title,
            Err(e) => {
                tracing::warn!(%url, error = %e, "title extraction failed");
                None
            }
        };

        let (current, previous, newly_sold) = match page.units().await {
            Ok(snapshot) => self.record_snapshot(&url, snapshot, now).await,
            Err(e) => {
                tracing::warn!(%url, error = %e, "unit scrape returned no result");
                let pending = self.newly_sold.pending(&url).await;
                (None, None, or_log(pending, "read newlySoldUnits", Vec::new()))
            }
        };

        let stored_title = display_title(title.as_deref(), &code);
        or_log(
            self.visited.upsert(&url, &stored_title).await,
            "upsert visitedUrls",
            false,
        );

        PopupView::Listing(ListingView {
            url,
            code,
            title,
            current,
            previous,
            newly_sold,
            visited: self.visited().await,
        })
    }

    /// Diffs against stored history, then persists the new snapshot,
    /// transition set and counts, in that order.
    async fn record_snapshot(
        &self,
        url: &str,
        snapshot: UnitSnapshot,
        now: DateTime<Utc>,
    ) -> (Option<UnitCounts>, Option<UnitCounts>, Vec<SoldTransitionRecord>) {
        let counts = snapshot.counts();
        tracing::info!(
            url,
            total = counts.total_units,
            sold = counts.sold_count,
            not_sold = counts.not_sold_count,
            "scraped listing"
        );

        let previous_counts = or_log(self.counts.previous(url).await, "read urlCounts", None);
        let previous_statuses: Vec<UnitStatus> =
            or_log(self.statuses.latest(url).await, "read unitStatuses", Vec::new());

        // Without the stored set, writing would discard unacknowledged records.
        let existing = self.newly_sold.pending(url).await;
        let existing_ok = existing.is_ok();
        let existing = or_log(existing, "read newlySoldUnits", Vec::new());

        let newly_sold = detect_at(&snapshot.unit_statuses, &previous_statuses, &existing, now);
        if newly_sold.len() > existing.len() {
            tracing::info!(url, count = newly_sold.len() - existing.len(), "units newly sold");
        }

        or_log(
            self.statuses.replace(url, snapshot.unit_statuses).await,
            "write unitStatuses",
            (),
        );
        if existing_ok {
            or_log(
                self.newly_sold.replace(url, newly_sold.clone()).await,
                "write newlySoldUnits",
                (),
            );
        }
        or_log(self.counts.record(url, counts).await, "write urlCounts", ());

        (Some(counts), previous_counts, newly_sold)
    }

    /// Clears the newly-sold notice for one listing. Pages that are not
    /// unit listings are rejected without touching the store.
    pub async fn acknowledge(&self, url: &str) -> TrackerResult<()> {
        if apdl_code(url).is_none() {
            return Err(TrackerError::BadRequest(format!("not a unit listing: {url}")));
        }
        self.newly_sold.acknowledge(url).await?;
        tracing::info!(url = normalize_url(url), "acknowledged newly sold units");
        Ok(())
    }

    /// Dropdown entries in stored order; empty if the store cannot be read.
    pub async fn visited(&self) -> Vec<ListingEntry> {
        or_log(self.visited.list().await, "read visitedUrls", Vec::new())
    }

    pub async fn cleanup(&self) -> TrackerResult<CleanupReport> {
        self.visited.cleanup().await
    }
}

/// The URL to open for a dropdown selection; an empty selection opens nothing.
pub fn selected_url(selection: &str) -> Option<&str> {
    let selection = selection.trim();
    (!selection.is_empty()).then(|| normalize_url(selection))
}
