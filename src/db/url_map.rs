use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::db::{get_or_default, put, KeyValueStore};
use crate::domain::listing::normalize_url;
use crate::errors::TrackerResult;

/// A JSON object stored under one key, mapping normalized listing URL to `T`.
/// Every write replaces the whole object. Entries are decoded one listing at
/// a time, so an unreadable entry only affects its own listing.
pub struct UrlMap<T> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> UrlMap<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _value: PhantomData,
        }
    }

    async fn load_raw(&self) -> TrackerResult<BTreeMap<String, Value>> {
        get_or_default(self.store.as_ref(), self.key).await
    }

    pub async fn get(&self, url: &str) -> TrackerResult<Option<T>> {
        let mut all = self.load_raw().await?;
        match all.remove(normalize_url(url)) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    /// Replaces the value for one listing. Every other entry is written back
    /// exactly as it was read.
    pub async fn insert(&self, url: &str, value: T) -> TrackerResult<()> {
        let mut all = self.load_raw().await?;
        all.insert(normalize_url(url).to_string(), serde_json::to_value(value)?);
        put(self.store.as_ref(), self.key, &all).await
    }
}
