//! In-memory record store.

use crate::traits::RecordStore;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use userbase_core::{item_key, Item, UserbaseError, UserbaseResult, PRIMARY_KEY};

/// Process-local record store backed by a `HashMap`.
///
/// Provides read-after-write consistency within the process. Used in tests
/// and for the `memory` backend.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    items: RwLock<HashMap<String, Item>>,
}

impl InMemoryRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `items`.
    ///
    /// Items without a string primary key are skipped.
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let map = items
            .into_iter()
            .filter_map(|item| {
                let key = item_key(&item)?.to_string();
                Some((key, item))
            })
            .collect();
        Self {
            items: RwLock::new(map),
        }
    }

    /// Returns the number of stored items.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Returns `true` if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn get(&self, key: &str) -> UserbaseResult<Option<Item>> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn scan_all(&self) -> UserbaseResult<Vec<Item>> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn put(&self, item: Item) -> UserbaseResult<()> {
        let key = item_key(&item)
            .ok_or_else(|| {
                UserbaseError::encoding(format!("item has no string '{PRIMARY_KEY}' attribute"))
            })?
            .to_string();

        debug!("Memory store: put {}", key);
        self.items.write().await.insert(key, item);
        Ok(())
    }

    async fn delete(&self, key: &str) -> UserbaseResult<()> {
        let existed = self.items.write().await.remove(key).is_some();
        debug!("Memory store: delete {} (existed: {})", key, existed);
        Ok(())
    }
}
