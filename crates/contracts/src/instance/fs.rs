use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    File,
    Directory,
    Unknown,
}

/// Entry of a directory listing, `path` is relative to the instance root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub path: String,
    pub file_type: FileType,
    pub size: Option<u64>,
    /// Unix timestamp, seconds
    pub modified: Option<i64>,
}

/// Query of the `fs/ls` and `fs/read` endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FsQuery {
    #[serde(default)]
    pub path: String,
}

/// Query of the `fs/move` endpoint, both paths relative to the instance root
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FsMoveQuery {
    pub from: String,
    pub to: String,
}
