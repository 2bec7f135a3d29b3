use contracts::api::{current_user_path, login_path};
use contracts::system::auth::{LoginRequest, LoginResponse, UserInfo};

use crate::shared::api_utils::{get_json, post_json, HttpError};

/// Login with username and password
pub async fn login(username: String, password: String) -> Result<LoginResponse, HttpError> {
    let request = LoginRequest { username, password };
    post_json(&login_path(), None, &request).await
}

/// Get current user info
pub async fn get_current_user(access_token: &str) -> Result<UserInfo, HttpError> {
    get_json(&current_user_path(), access_token).await
}
