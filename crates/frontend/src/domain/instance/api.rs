use contracts::api::{
    game_setting_path, instance_create_path, instance_events_path, instance_fs_ls_path,
    instance_fs_mkdir_path, instance_fs_move_path, instance_fs_new_path, instance_fs_read_path,
    instance_fs_rm_path, instance_fs_rmdir_path, instance_fs_write_path, instance_info_path,
    instance_list_path, instance_path,
};
use contracts::instance::{
    CreateInstanceRequest, FileEntry, FileType, InstanceEvent, InstanceInfo,
};

use crate::shared::api_utils::{
    delete, get_json, get_text, post_json, put_text, with_move_query, with_path_query,
    HttpError,
};

pub async fn fetch_instances(token: &str) -> Result<Vec<InstanceInfo>, HttpError> {
    get_json(instance_list_path(), token).await
}

pub async fn fetch_instance_info(token: &str, uuid: &str) -> Result<InstanceInfo, HttpError> {
    get_json(&instance_info_path(uuid), token).await
}

/// Returns the uuid of the new instance
pub async fn create_instance(
    token: &str,
    request: &CreateInstanceRequest,
) -> Result<String, HttpError> {
    post_json(instance_create_path(), Some(token), request).await
}

pub async fn remove_instance(token: &str, uuid: &str) -> Result<(), HttpError> {
    delete(&instance_path(uuid), token).await
}

pub async fn set_game_setting(
    token: &str,
    uuid: &str,
    setting: &str,
    value: String,
) -> Result<(), HttpError> {
    put_text(&game_setting_path(uuid, setting), token, value).await
}

pub async fn fetch_events(token: &str, uuid: &str) -> Result<Vec<InstanceEvent>, HttpError> {
    get_json(&instance_events_path(uuid), token).await
}

/// `relative` is a path under the instance root, "" for the root itself
pub async fn fetch_files(
    token: &str,
    uuid: &str,
    relative: &str,
) -> Result<Vec<FileEntry>, HttpError> {
    get_json(&with_path_query(&instance_fs_ls_path(uuid), relative), token).await
}

pub async fn read_file(token: &str, uuid: &str, relative: &str) -> Result<String, HttpError> {
    get_text(&with_path_query(&instance_fs_read_path(uuid), relative), token).await
}

pub async fn write_file(
    token: &str,
    uuid: &str,
    relative: &str,
    content: String,
) -> Result<(), HttpError> {
    put_text(&with_path_query(&instance_fs_write_path(uuid), relative), token, content).await
}

pub async fn new_file(token: &str, uuid: &str, relative: &str) -> Result<(), HttpError> {
    put_text(&with_path_query(&instance_fs_new_path(uuid), relative), token, String::new()).await
}

pub async fn make_directory(token: &str, uuid: &str, relative: &str) -> Result<(), HttpError> {
    put_text(&with_path_query(&instance_fs_mkdir_path(uuid), relative), token, String::new()).await
}

/// Files and directories go through different endpoints
pub async fn remove_entry(token: &str, uuid: &str, entry: &FileEntry) -> Result<(), HttpError> {
    let path = match entry.file_type {
        FileType::Directory => instance_fs_rmdir_path(uuid),
        _ => instance_fs_rm_path(uuid),
    };
    delete(&with_path_query(&path, &entry.path), token).await
}

pub async fn move_path(token: &str, uuid: &str, from: &str, to: &str) -> Result<(), HttpError> {
    put_text(&with_move_query(&instance_fs_move_path(uuid), from, to), token, String::new()).await
}
