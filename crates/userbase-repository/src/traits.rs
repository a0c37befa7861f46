//! Record store trait definition.

use async_trait::async_trait;
use userbase_core::{Item, UserbaseResult};

/// Key-value capability set the user service depends on.
///
/// Implementations must report backend failures as
/// [`UserbaseError::StoreUnavailable`](userbase_core::UserbaseError::StoreUnavailable)
/// and never conflate them with an absent key.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Gets the item stored under `key`, or `None` if there is none.
    async fn get(&self, key: &str) -> UserbaseResult<Option<Item>>;

    /// Returns every stored item, in backend-defined order.
    async fn scan_all(&self) -> UserbaseResult<Vec<Item>>;

    /// Writes `item` under its primary key, replacing any previous item.
    ///
    /// Fails with `Encoding` if the item has no string primary key or cannot
    /// be represented by the backend.
    async fn put(&self, item: Item) -> UserbaseResult<()>;

    /// Removes the item stored under `key`. Absent keys are not an error.
    async fn delete(&self, key: &str) -> UserbaseResult<()>;
}
