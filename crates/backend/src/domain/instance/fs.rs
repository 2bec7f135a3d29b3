//! File manager over the directory of an instance.
//!
//! Every path is relative to the instance root and must stay inside it, both
//! lexically and after symlinks are resolved.

use contracts::instance::{FileEntry, FileType};
use std::path::{Component, Path, PathBuf};

use crate::shared::error::ApiError;
use contracts::shared::format::format_byte;

/// Files above this size are not previewed in the dashboard
pub const MAX_READ_SIZE: u64 = 1024 * 1024;

fn escapes(relative: &str) -> ApiError {
    ApiError::PermissionDenied(format!(
        "Path {} escapes the instance directory",
        relative
    ))
}

/// Join `relative` onto `root`, refusing anything that could leave `root`
pub fn scoped_join(root: &Path, relative: &str) -> Result<PathBuf, ApiError> {
    let relative = relative.trim_start_matches(['/', '\\']);
    let mut joined = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => joined.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(escapes(relative));
            }
        }
    }
    Ok(joined)
}

/// [`scoped_join`], then check where the path really lands.
///
/// The target may not exist yet: its nearest existing ancestor is checked
/// instead. A dangling symlink on the way is refused.
pub async fn resolve(root: &Path, relative: &str) -> Result<PathBuf, ApiError> {
    let joined = scoped_join(root, relative)?;
    let real_root = tokio::fs::canonicalize(root).await?;

    let mut probe = joined.as_path();
    loop {
        match tokio::fs::canonicalize(probe).await {
            Ok(real) if real.starts_with(&real_root) => return Ok(joined),
            Ok(_) => return Err(escapes(relative)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if tokio::fs::symlink_metadata(probe).await.is_ok() {
                    return Err(escapes(relative));
                }
                match probe.parent() {
                    Some(parent) if parent.starts_with(root) => probe = parent,
                    _ => return Ok(joined),
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn not_found(what: &str, relative: &str, e: std::io::Error) -> ApiError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ApiError::NotFound(format!("{} {} not found", what, relative))
    } else {
        e.into()
    }
}

fn relative_to(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Directory listing, directories first, then by name
pub async fn list_dir(root: &Path, relative: &str) -> Result<Vec<FileEntry>, ApiError> {
    let dir = resolve(root, relative).await?;
    let mut read_dir = tokio::fs::read_dir(&dir)
        .await
        .map_err(|e| not_found("Directory", relative, e))?;

    let mut entries = Vec::new();
    while let Some(entry) = read_dir.next_entry().await? {
        let path = entry.path();
        let metadata = entry.metadata().await.ok();
        let file_type = match &metadata {
            Some(m) if m.is_dir() => FileType::Directory,
            Some(m) if m.is_file() => FileType::File,
            _ => FileType::Unknown,
        };
        let modified = metadata
            .as_ref()
            .and_then(|m| m.modified().ok())
            .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
            .map(|d| d.as_secs() as i64);

        entries.push(FileEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: relative_to(root, &path),
            file_type,
            size: metadata.as_ref().filter(|m| m.is_file()).map(|m| m.len()),
            modified,
        });
    }

    entries.sort_by(|a, b| {
        let a_dir = a.file_type == FileType::Directory;
        let b_dir = b.file_type == FileType::Directory;
        b_dir.cmp(&a_dir).then_with(|| a.name.cmp(&b.name))
    });
    Ok(entries)
}

/// Text content of a file, for preview
pub async fn read_text(root: &Path, relative: &str) -> Result<String, ApiError> {
    let path = resolve(root, relative).await?;
    let metadata = tokio::fs::metadata(&path)
        .await
        .map_err(|e| not_found("File", relative, e))?;
    if !metadata.is_file() {
        return Err(ApiError::MalformedRequest(format!("{} is not a file", relative)));
    }
    if metadata.len() > MAX_READ_SIZE {
        return Err(ApiError::MalformedRequest(format!(
            "File is too large to preview ({})",
            format_byte(metadata.len())
        )));
    }

    let bytes = tokio::fs::read(&path).await?;
    String::from_utf8(bytes)
        .map_err(|_| ApiError::MalformedRequest(format!("{} is not a text file", relative)))
}

/// Replace the content of a file, creating it and missing parent directories
pub async fn write_file(root: &Path, relative: &str, content: &[u8]) -> Result<PathBuf, ApiError> {
    let path = resolve(root, relative).await?;
    if path == root {
        return Err(ApiError::MalformedRequest("Path must name a file".into()));
    }
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, content).await?;
    Ok(path)
}

/// Create an empty file; an existing file is left alone and reported
pub async fn new_file(root: &Path, relative: &str) -> Result<PathBuf, ApiError> {
    let path = resolve(root, relative).await?;
    match tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .await
    {
        Ok(_) => Ok(path),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Err(
            ApiError::MalformedRequest(format!("{} already exists", relative)),
        ),
        Err(e) => Err(not_found("Parent directory of", relative, e)),
    }
}

/// `mkdir -p` inside the instance
pub async fn make_dir(root: &Path, relative: &str) -> Result<PathBuf, ApiError> {
    let path = resolve(root, relative).await?;
    tokio::fs::create_dir_all(&path).await?;
    Ok(path)
}

pub async fn remove_file(root: &Path, relative: &str) -> Result<PathBuf, ApiError> {
    let path = resolve(root, relative).await?;
    let metadata = tokio::fs::symlink_metadata(&path)
        .await
        .map_err(|e| not_found("File", relative, e))?;
    if metadata.is_dir() {
        return Err(ApiError::MalformedRequest(format!("{} is a directory", relative)));
    }
    tokio::fs::remove_file(&path).await?;
    Ok(path)
}

/// Remove a directory with everything in it; the instance root itself is kept
pub async fn remove_dir(root: &Path, relative: &str) -> Result<PathBuf, ApiError> {
    let path = resolve(root, relative).await?;
    if path == root {
        return Err(ApiError::PermissionDenied("Cannot delete instance root".into()));
    }
    let metadata = tokio::fs::symlink_metadata(&path)
        .await
        .map_err(|e| not_found("Directory", relative, e))?;
    if !metadata.is_dir() {
        return Err(ApiError::MalformedRequest(format!("{} is not a directory", relative)));
    }
    tokio::fs::remove_dir_all(&path).await?;
    Ok(path)
}

/// Rename `from` to `to`, both relative to the instance root
pub async fn move_path(root: &Path, from: &str, to: &str) -> Result<PathBuf, ApiError> {
    let source = resolve(root, from).await?;
    let dest = resolve(root, to).await?;
    if source == root || dest == root {
        return Err(ApiError::PermissionDenied("Cannot move instance root".into()));
    }
    tokio::fs::symlink_metadata(&source)
        .await
        .map_err(|e| not_found("Path", from, e))?;
    if tokio::fs::try_exists(&dest).await? {
        return Err(ApiError::MalformedRequest(format!("{} already exists", to)));
    }
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::rename(&source, &dest).await?;
    Ok(dest)
}
