use crate::error::BatchError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively finds workflow `.json` files under `root`, sorted by path.
///
/// When `limit` is set only the first `limit` files are returned.
pub fn discover_workflows(root: &Path, limit: Option<usize>) -> Result<Vec<PathBuf>, BatchError> {
    if !root.exists() {
        return Err(BatchError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(BatchError::RootNotDirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| BatchError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_json = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            files.push(entry.into_path());
        }
    }

    if let Some(limit) = limit.filter(|limit| *limit > 0) {
        files.truncate(limit);
    }
    log::info!("Discovered {} workflow file(s) in {}", files.len(), root.display());
    Ok(files)
}
