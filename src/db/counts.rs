use std::sync::Arc;

use crate::db::url_map::UrlMap;
use crate::db::{KeyValueStore, URL_COUNTS_KEY};
use crate::domain::UnitCounts;
use crate::errors::TrackerResult;

/// Last aggregate counts per listing. Only one prior visit is kept.
pub struct CountHistory {
    map: UrlMap<UnitCounts>,
}

impl CountHistory {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            map: UrlMap::new(store, URL_COUNTS_KEY),
        }
    }

    pub async fn previous(&self, url: &str) -> TrackerResult<Option<UnitCounts>> {
        self.map.get(url).await
    }

    /// Unconditionally overwrites the stored counts for `url`.
    pub async fn record(&self, url: &str, counts: UnitCounts) -> TrackerResult<()> {
        self.map.insert(url, counts).await
    }
}
