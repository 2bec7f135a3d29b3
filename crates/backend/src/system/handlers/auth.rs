use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use contracts::system::auth::{LoginRequest, LoginResponse, UserInfo};

use crate::shared::error::ApiError;
use crate::state::AppState;
use crate::system::auth::extractor::CurrentUser;
use crate::system::auth::jwt;

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .auth
        .users
        .verify_credentials(&request.username, &request.password)?
        .ok_or_else(|| {
            tracing::warn!("Failed login attempt for user {}", request.username);
            ApiError::Unauthorized("Invalid username or password".into())
        })?;

    let access_token =
        jwt::generate_access_token(&state.auth.keys, &user.id, &user.username, user.is_admin)?;

    tracing::info!("User {} logged in", user.username);
    Ok(Json(LoginResponse { access_token, user }))
}

/// GET /auth/me (protected by middleware)
pub async fn current_user(
    State(state): State<AppState>,
    CurrentUser(claims): CurrentUser,
) -> Result<Json<UserInfo>, StatusCode> {
    state
        .auth
        .users
        .get_by_id(&claims.sub)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
