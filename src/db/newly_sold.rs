use std::sync::Arc;

use crate::db::url_map::UrlMap;
use crate::db::{KeyValueStore, NEWLY_SOLD_UNITS_KEY};
use crate::domain::SoldTransitionRecord;
use crate::errors::TrackerResult;

/// Unacknowledged sold transitions per listing.
pub struct NewlySoldUnits {
    map: UrlMap<Vec<SoldTransitionRecord>>,
}

impl NewlySoldUnits {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            map: UrlMap::new(store, NEWLY_SOLD_UNITS_KEY),
        }
    }

    pub async fn pending(&self, url: &str) -> TrackerResult<Vec<SoldTransitionRecord>> {
        Ok(self.map.get(url).await?.unwrap_or_default())
    }

    pub async fn replace(&self, url: &str, records: Vec<SoldTransitionRecord>) -> TrackerResult<()> {
        self.map.insert(url, records).await
    }

    /// Marks every pending transition for `url` as read. Other listings and
    /// the snapshot history are left alone.
    pub async fn acknowledge(&self, url: &str) -> TrackerResult<()> {
        self.map.insert(url, Vec::new()).await
    }
}
