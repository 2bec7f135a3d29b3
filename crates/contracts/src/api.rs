//! API path builders.
//!
//! Paths are relative to the API root (`/api/v1`); both the router in the
//! backend and the request helpers in the frontend go through these, so a
//! route can never drift between the two sides.

/// Prefix every API route is nested under.
pub const API_ROOT: &str = "/api/v1";

pub fn health_path() -> &'static str {
    "/health"
}

pub fn login_path() -> &'static str {
    "/auth/login"
}

pub fn current_user_path() -> &'static str {
    "/auth/me"
}

pub fn instance_list_path() -> &'static str {
    "/instance/list"
}

pub fn instance_create_path() -> &'static str {
    "/instance/create"
}

pub fn instance_path(uuid: &str) -> String {
    format!("/instance/{uuid}")
}

pub fn instance_info_path(uuid: &str) -> String {
    format!("/instance/{uuid}/info")
}

pub fn game_settings_path(uuid: &str) -> String {
    format!("/instance/{uuid}/game")
}

/// `GET /instance/{uuid}/game/{setting}`, both parts inserted verbatim.
pub fn game_setting_path(uuid: &str, setting: &str) -> String {
    format!("/instance/{uuid}/game/{setting}")
}

pub fn instance_events_path(uuid: &str) -> String {
    format!("/instance/{uuid}/events")
}

/// Directory listing; the relative path goes into the `path` query parameter.
pub fn instance_fs_ls_path(uuid: &str) -> String {
    format!("/instance/{uuid}/fs/ls")
}

/// File read; the relative path goes into the `path` query parameter.
pub fn instance_fs_read_path(uuid: &str) -> String {
    format!("/instance/{uuid}/fs/read")
}

/// `PUT`, request body becomes the file content.
pub fn instance_fs_write_path(uuid: &str) -> String {
    format!("/instance/{uuid}/fs/write")
}

/// `PUT`, creates an empty file.
pub fn instance_fs_new_path(uuid: &str) -> String {
    format!("/instance/{uuid}/fs/new")
}

pub fn instance_fs_mkdir_path(uuid: &str) -> String {
    format!("/instance/{uuid}/fs/mkdir")
}

pub fn instance_fs_rm_path(uuid: &str) -> String {
    format!("/instance/{uuid}/fs/rm")
}

pub fn instance_fs_rmdir_path(uuid: &str) -> String {
    format!("/instance/{uuid}/fs/rmdir")
}

/// `PUT` with `from` and `to` query parameters.
pub fn instance_fs_move_path(uuid: &str) -> String {
    format!("/instance/{uuid}/fs/move")
}
