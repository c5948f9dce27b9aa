use axum::{
    extract::{Query, State},
    Json,
};
use common::types::StatusAck;
use serde::Deserialize;
use serde_json::Value;
use service::saves::SaveRecord;

use crate::errors::ApiError;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct LoadQuery {
    pub player_id: Option<String>,
}

/// `POST /save` with `{"player_id": ..., "data": ...}`.
///
/// A missing body, a non-JSON content type or malformed JSON all arrive as
/// `None` and fail validation like a body with a missing field.
pub async fn save(
    State(state): State<AppState>,
    payload: Option<Json<Value>>,
) -> Result<Json<StatusAck>, ApiError> {
    state.saves.save(payload.map(|Json(v)| v)).await?;
    Ok(Json(StatusAck::ok()))
}

/// `GET /load?player_id=...`
pub async fn load(
    State(state): State<AppState>,
    query: Option<Query<LoadQuery>>,
) -> Result<Json<SaveRecord>, ApiError> {
    let player_id = query.and_then(|Query(q)| q.player_id);
    let record = state.saves.load(player_id.as_deref()).await?;
    Ok(Json(record))
}
