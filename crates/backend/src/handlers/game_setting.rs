use axum::{
    extract::{Path, State},
    Json,
};
use contracts::instance::GameSettingEntry;

use crate::shared::error::ApiError;
use crate::state::AppState;

/// GET /instance/:uuid/game
pub async fn list_game_settings(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<Json<Vec<GameSettingEntry>>, ApiError> {
    let settings = state
        .instances
        .game_settings(&uuid)
        .await?
        .into_iter()
        .map(|(name, value)| GameSettingEntry { name, value })
        .collect();
    Ok(Json(settings))
}

/// GET /instance/:uuid/game/:setting
///
/// Тело ответа: значение настройки как есть (text/plain)
pub async fn get_game_setting(
    State(state): State<AppState>,
    Path((uuid, setting)): Path<(String, String)>,
) -> Result<String, ApiError> {
    state.instances.game_setting(&uuid, &setting).await
}

/// PUT /instance/:uuid/game/:setting
///
/// Тело запроса: новое значение (text/plain)
pub async fn set_game_setting(
    State(state): State<AppState>,
    Path((uuid, setting)): Path<(String, String)>,
    value: String,
) -> Result<Json<String>, ApiError> {
    state
        .instances
        .set_game_setting(&uuid, &setting, &value)
        .await?;
    Ok(Json("OK".to_string()))
}
