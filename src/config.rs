use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_TRIGGER_KEYWORDS: [&str; 5] = ["trigger", "webhook", "schedule", "cron", "manual"];

/// Top-level configuration. Every section and key is optional in the file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FlowmendConfig {
    pub layout: LayoutConfig,
    pub repair: RepairConfig,
    pub cleanup: CleanupConfig,
    pub batch: BatchConfig,
}

/// Grid geometry and seed detection for the layered layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub spacing_x: i64,
    pub spacing_y: i64,
    pub margin_x: i64,
    pub margin_y: i64,
    /// Case-insensitive substrings of a node `type` that mark it as a trigger.
    pub trigger_keywords: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spacing_x: 280,
            spacing_y: 180,
            margin_x: 100,
            margin_y: 100,
            trigger_keywords: DEFAULT_TRIGGER_KEYWORDS
                .iter()
                .map(|keyword| keyword.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RepairConfig {
    /// Synthesize a left-to-right chain when no connection survives normalization.
    pub infer_chain: bool,
    /// Port used for inferred wires.
    pub chain_port: String,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            infer_chain: false,
            chain_port: "main".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    pub documentation_node_type: String,
    /// Marker a documentation note's name must contain, compared case-insensitively.
    pub documentation_marker: String,
    pub unnamed_prefix: String,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            documentation_node_type: "n8n-nodes-base.stickyNote".to_string(),
            documentation_marker: "documentation".to_string(),
            unnamed_prefix: "Unnamed".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub workflows_dir: PathBuf,
    /// Parent directory for timestamped backup folders.
    pub backup_root: PathBuf,
    pub limit: Option<usize>,
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workflows_dir: PathBuf::from("workflows"),
            backup_root: PathBuf::from("backups"),
            limit: None,
            parallel: true,
        }
    }
}

/// Loads the configuration from a TOML file, or returns the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<FlowmendConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(FlowmendConfig::default());
    };
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_config(contents: &str) -> Result<FlowmendConfig, toml::de::Error> {
    toml::from_str(contents)
}
