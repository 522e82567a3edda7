use crate::error::DocumentError;
use chrono::Local;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A timestamped backup folder name, e.g. `backups/repair_connections_20261019142530`.
pub fn timestamped_backup_dir(parent: &Path, task: &str) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d%H%M%S");
    parent.join(format!("{}_{}", task, stamp))
}

/// Copies `file` into `backup_root`, preserving its path relative to `root`.
pub fn backup_file(file: &Path, root: &Path, backup_root: &Path) -> Result<PathBuf, DocumentError> {
    let relative = file
        .strip_prefix(root)
        .ok()
        .map(Path::to_path_buf)
        .or_else(|| file.file_name().map(PathBuf::from))
        .unwrap_or_else(|| file.to_path_buf());
    let backup = backup_root.join(relative);

    let map_err = |source| DocumentError::Backup {
        path: file.to_path_buf(),
        backup: backup.clone(),
        source,
    };
    if let Some(parent) = backup.parent() {
        fs::create_dir_all(parent).map_err(map_err)?;
    }
    fs::copy(file, &backup).map_err(map_err)?;
    Ok(backup)
}

/// Replaces `path` with `contents` all-or-nothing: the data goes to a temporary file in
/// the same directory which is then renamed over the original.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), DocumentError> {
    let map_err = |source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir).map_err(map_err)?;
    temp.write_all(contents.as_bytes()).map_err(map_err)?;
    temp.as_file().sync_all().map_err(map_err)?;
    temp.persist(path).map_err(|e| map_err(e.error))?;
    Ok(())
}
