use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use super::domain::{coerce_player_id, SaveRecord, MISSING_SAVE_FIELDS, PLAYER_ID_REQUIRED, SAVE_NOT_FOUND};
use super::store::SaveStore;
use crate::errors::{Result, ServiceError};

/// Save/load rules on top of a [`SaveStore`].
#[derive(Clone)]
pub struct SaveService {
    store: Arc<dyn SaveStore>,
}

impl SaveService {
    pub fn new(store: Arc<dyn SaveStore>) -> Self {
        Self { store }
    }

    /// Store `payload.data` under `payload.player_id`, replacing any previous save.
    ///
    /// The payload must be a JSON object with both keys present (`null` counts).
    /// Returns the coerced player id. Nothing is written when validation fails.
    pub async fn save(&self, payload: Option<Value>) -> Result<String> {
        let mut obj = match payload {
            Some(Value::Object(obj)) => obj,
            _ => return Err(ServiceError::validation(MISSING_SAVE_FIELDS)),
        };
        let (raw_id, data) = match (obj.remove("player_id"), obj.remove("data")) {
            (Some(id), Some(data)) => (id, data),
            _ => return Err(ServiceError::validation(MISSING_SAVE_FIELDS)),
        };

        let player_id = coerce_player_id(&raw_id);
        if player_id.is_empty() {
            return Err(ServiceError::validation(MISSING_SAVE_FIELDS));
        }

        self.store.put(player_id.clone(), data).await?;
        info!(event = "save_stored", %player_id, "player save stored");
        Ok(player_id)
    }

    /// Fetch the save for `player_id`.
    pub async fn load(&self, player_id: Option<&str>) -> Result<SaveRecord> {
        let player_id = match player_id {
            Some(id) if !id.is_empty() => id,
            _ => return Err(ServiceError::validation(PLAYER_ID_REQUIRED)),
        };

        let mut saves = self.store.read().await?;
        match saves.remove(player_id) {
            Some(data) => Ok(SaveRecord { player_id: player_id.to_string(), data }),
            None => {
                debug!(%player_id, "no save for player");
                Err(ServiceError::not_found(SAVE_NOT_FOUND))
            }
        }
    }
}
