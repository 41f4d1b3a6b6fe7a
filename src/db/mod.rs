//! Persistence for the tracker.
//!
//! All state lives in a key-value store under four independent keys, each
//! holding a JSON document. The repositories in this module give each key a
//! typed contract; none of them write to more than one key per call, so a
//! failure between two calls can leave the maps out of step with each other
//! but never half-writes a single map.

pub mod connection;
pub mod counts;
pub mod kv;
#[cfg(test)]
pub mod memory;
pub mod newly_sold;
pub mod unit_statuses;
pub mod url_map;
pub mod visited;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::TrackerResult;

pub use connection::{init_db, Database};
pub use counts::CountHistory;
pub use kv::SqliteStore;
#[cfg(test)]
pub use memory::MemoryStore;
pub use newly_sold::NewlySoldUnits;
pub use unit_statuses::UnitStatusHistory;
pub use visited::{CleanupReport, VisitedListings};

pub const VISITED_URLS_KEY: &str = "visitedUrls";
pub const URL_COUNTS_KEY: &str = "urlCounts";
pub const UNIT_STATUSES_KEY: &str = "unitStatuses";
pub const NEWLY_SOLD_UNITS_KEY: &str = "newlySoldUnits";

/// Asynchronous key-value storage. Each `set` replaces one key atomically;
/// there are no multi-key transactions.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when the key has never been written.
    async fn get(&self, key: &str) -> TrackerResult<Option<Value>>;

    async fn set(&self, key: &str, value: Value) -> TrackerResult<()>;
}

/// Reads and decodes a key, falling back to `T::default()` when absent.
pub async fn get_or_default<T>(store: &dyn KeyValueStore, key: &str) -> TrackerResult<T>
where
    T: DeserializeOwned + Default,
{
    match store.get(key).await? {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => Ok(serde_json::from_value(value)?),
    }
}

pub async fn put<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> TrackerResult<()>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_value(value)?;
    store.set(key, json).await
}
