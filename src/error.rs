use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, writing or backing up a single workflow document.
///
/// These are file-level failures. A batch run records them against the offending file
/// and moves on to the next one.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid workflow JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Workflow document must be a JSON object, but found {found}")]
    NotAnObject { found: &'static str },

    #[error("Failed to back up '{path}' to '{backup}': {source}")]
    Backup {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that abort a whole batch run before any document is processed.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Workflows directory not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Workflows path is not a directory: {0}")]
    RootNotDirectory(PathBuf),

    #[error("Failed to walk workflows directory '{root}': {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Errors that can occur while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
