//! Local-disk storage for uploaded documents.

use std::path::{Path, PathBuf};

use anyhow::Result;
use bytes::Bytes;
use uuid::Uuid;

/// Persists an uploaded document under `storage_dir` with a unique stored
/// name, keeping the original extension so the parser can dispatch on it.
/// Returns the stored name and the full path; the path stays readable until
/// the caller deletes it.
pub async fn save_upload(
    storage_dir: &str,
    original_filename: &str,
    data: Bytes,
) -> Result<(String, PathBuf)> {
    tokio::fs::create_dir_all(storage_dir).await?;

    let stored_name = match file_extension(original_filename) {
        Some(ext) => format!("{}.{ext}", Uuid::new_v4().simple()),
        None => Uuid::new_v4().simple().to_string(),
    };
    let dest = Path::new(storage_dir).join(&stored_name);
    tokio::fs::write(&dest, &data).await?;

    Ok((stored_name, dest))
}

/// Lowercased extension of a filename, if any.
pub fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
