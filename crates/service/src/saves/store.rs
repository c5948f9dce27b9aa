use async_trait::async_trait;
use serde_json::Value;

use crate::errors::Result;
use crate::storage::{SaveFileStore, SaveMap};

/// Trait abstraction for the persisted save map.
/// The file-backed store is the production implementation; tests swap in others.
#[async_trait]
pub trait SaveStore: Send + Sync {
    /// Whole map as currently persisted.
    async fn read(&self) -> Result<SaveMap>;
    /// Replace the persisted map.
    async fn write(&self, map: &SaveMap) -> Result<()>;
    /// Read, set `player_id`, write back as one serialized step.
    async fn put(&self, player_id: String, data: Value) -> Result<()>;
}

#[async_trait]
impl SaveStore for SaveFileStore {
    async fn read(&self) -> Result<SaveMap> { self.read().await }
    async fn write(&self, map: &SaveMap) -> Result<()> { self.write(map).await }
    async fn put(&self, player_id: String, data: Value) -> Result<()> {
        self.update_map(|m| {
            m.insert(player_id, data);
        })
        .await
    }
}
