use axum::{
    extract::{Path, State},
    Json,
};
use contracts::instance::{CreateInstanceRequest, InstanceEvent, InstanceInfo};

use crate::shared::error::ApiError;
use crate::state::AppState;

/// GET /instance/list
pub async fn list_instances(State(state): State<AppState>) -> Json<Vec<InstanceInfo>> {
    Json(state.instances.list().await)
}

/// POST /instance/create
pub async fn create_instance(
    State(state): State<AppState>,
    Json(request): Json<CreateInstanceRequest>,
) -> Result<Json<String>, ApiError> {
    let uuid = state.instances.create(request).await?;
    Ok(Json(uuid))
}

/// GET /instance/:uuid/info
pub async fn get_instance_info(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<Json<InstanceInfo>, ApiError> {
    Ok(Json(state.instances.get_info(&uuid).await?))
}

/// DELETE /instance/:uuid
pub async fn remove_instance(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<Json<String>, ApiError> {
    state.instances.remove(&uuid).await?;
    Ok(Json("OK".to_string()))
}

/// GET /instance/:uuid/events
pub async fn get_instance_events(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<Json<Vec<InstanceEvent>>, ApiError> {
    Ok(Json(state.instances.events(&uuid).await?))
}
