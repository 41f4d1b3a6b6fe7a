use std::sync::Arc;

use crate::db::url_map::UrlMap;
use crate::db::{KeyValueStore, UNIT_STATUSES_KEY};
use crate::domain::UnitStatus;
use crate::errors::TrackerResult;

/// The full per-unit status list from the latest scrape of each listing.
pub struct UnitStatusHistory {
    map: UrlMap<Vec<UnitStatus>>,
}

impl UnitStatusHistory {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            map: UrlMap::new(store, UNIT_STATUSES_KEY),
        }
    }

    /// Empty when the listing has never been scraped.
    pub async fn latest(&self, url: &str) -> TrackerResult<Vec<UnitStatus>> {
        Ok(self.map.get(url).await?.unwrap_or_default())
    }

    pub async fn replace(&self, url: &str, statuses: Vec<UnitStatus>) -> TrackerResult<()> {
        self.map.insert(url, statuses).await
    }
}
