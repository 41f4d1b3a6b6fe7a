use chrono::{DateTime, TimeZone, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::db::{KeyValueStore, MemoryStore};
use crate::domain::unit::{NOT_SOLD_LABEL, SOLD_LABEL};
use crate::popup::PopupSession;
use crate::scraper::HtmlPage;

pub const LISTING_URL: &str = "https://teduh.kpkt.gov.my/unit-project-swasta/abc123";
pub const OTHER_LISTING_URL: &str = "https://teduh.kpkt.gov.my/unit-project-swasta/def456";
pub const SOLD: &str = SOLD_LABEL;
pub const NOT_SOLD: &str = NOT_SOLD_LABEL;

/// A fresh in-memory store plus a session over it.
pub fn memory_session() -> (Arc<MemoryStore>, PopupSession) {
    let store = Arc::new(MemoryStore::new());
    let dyn_store: Arc<dyn KeyValueStore> = store.clone();
    (store, PopupSession::new(dyn_store))
}

pub fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 9, 30, 0).unwrap()
}

/// One `div.unit-box` per `(unit number, status)` pair.
pub fn units_html(units: &[(&str, &str)]) -> String {
    units
        .iter()
        .map(|(unit, status)| {
            format!(
                r#"<div class="unit-box" data-tooltip='{{"No. Unit":"{unit}","Status Jualan":"{status}"}}'></div>"#
            )
        })
        .collect()
}

pub fn listing_page(url: &str, title: &str, units: &[(&str, &str)]) -> HtmlPage {
    let html = format!(
        r#"<html><body><p class="text-center font-semibold text-white">{title}</p>{}</body></html>"#,
        units_html(units)
    );
    HtmlPage::new(url, html)
}

/// Unique SQLite path in the temp dir.
pub fn temp_db_path(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "{prefix}_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}
