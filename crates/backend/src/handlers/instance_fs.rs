use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    Json,
};
use contracts::instance::{EventLevel, FileEntry, FsMoveQuery, FsQuery};

use crate::domain::instance::fs;
use crate::shared::error::ApiError;
use crate::state::AppState;

/// GET /instance/:uuid/fs/ls?path=...
pub async fn list_instance_files(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Query(query): Query<FsQuery>,
) -> Result<Json<Vec<FileEntry>>, ApiError> {
    let root = state.instances.instance_root(&uuid).await?;
    Ok(Json(fs::list_dir(&root, &query.path).await?))
}

/// GET /instance/:uuid/fs/read?path=...
pub async fn read_instance_file(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Query(query): Query<FsQuery>,
) -> Result<String, ApiError> {
    let root = state.instances.instance_root(&uuid).await?;
    fs::read_text(&root, &query.path).await
}

// Изменения файлов попадают в журнал событий инстанса
async fn record(state: &AppState, uuid: &str, message: String) -> Result<Json<()>, ApiError> {
    tracing::info!("Instance {}: {}", uuid, message);
    state
        .instances
        .record_event(uuid, EventLevel::Info, message)
        .await?;
    Ok(Json(()))
}

/// PUT /instance/:uuid/fs/write?path=... (body = new content)
pub async fn write_instance_file(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Query(query): Query<FsQuery>,
    body: Bytes,
) -> Result<Json<()>, ApiError> {
    let root = state.instances.instance_root(&uuid).await?;
    fs::write_file(&root, &query.path, &body).await?;
    record(&state, &uuid, format!("File {} written", query.path)).await
}

/// PUT /instance/:uuid/fs/new?path=...
pub async fn new_instance_file(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Query(query): Query<FsQuery>,
) -> Result<Json<()>, ApiError> {
    let root = state.instances.instance_root(&uuid).await?;
    fs::new_file(&root, &query.path).await?;
    record(&state, &uuid, format!("File {} created", query.path)).await
}

/// PUT /instance/:uuid/fs/mkdir?path=...
pub async fn make_instance_directory(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Query(query): Query<FsQuery>,
) -> Result<Json<()>, ApiError> {
    let root = state.instances.instance_root(&uuid).await?;
    fs::make_dir(&root, &query.path).await?;
    record(&state, &uuid, format!("Directory {} created", query.path)).await
}

/// DELETE /instance/:uuid/fs/rm?path=...
pub async fn remove_instance_file(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Query(query): Query<FsQuery>,
) -> Result<Json<()>, ApiError> {
    let root = state.instances.instance_root(&uuid).await?;
    fs::remove_file(&root, &query.path).await?;
    record(&state, &uuid, format!("File {} deleted", query.path)).await
}

/// DELETE /instance/:uuid/fs/rmdir?path=...
pub async fn remove_instance_dir(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Query(query): Query<FsQuery>,
) -> Result<Json<()>, ApiError> {
    let root = state.instances.instance_root(&uuid).await?;
    fs::remove_dir(&root, &query.path).await?;
    record(&state, &uuid, format!("Directory {} deleted", query.path)).await
}

/// PUT /instance/:uuid/fs/move?from=...&to=...
pub async fn move_instance_file(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Query(query): Query<FsMoveQuery>,
) -> Result<Json<()>, ApiError> {
    let root = state.instances.instance_root(&uuid).await?;
    fs::move_path(&root, &query.from, &query.to).await?;
    record(&state, &uuid, format!("Moved {} to {}", query.from, query.to)).await
}
