use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, VersionError};

/// File name looked up in the working directory and the user config directory
pub const CONFIG_FILE_NAME: &str = "repo-version.toml";

/// Represents the complete configuration for repo-version.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub tag: TagConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_marker() -> String {
    ".git".to_string()
}

fn default_tag_message() -> String {
    "Version {tag}".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

/// Configuration for the recursive repository scan.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ScanConfig {
    /// Entry whose presence marks a directory as a repository root
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Descend into directories whose name starts with `.`
    #[serde(default)]
    pub include_hidden: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            marker: default_marker(),
            include_hidden: false,
        }
    }
}

/// Configuration for tags written on increase.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagConfig {
    /// Annotation message; `{tag}` is replaced by the tag name
    #[serde(default = "default_tag_message")]
    pub message: String,
}

impl Default for TagConfig {
    fn default() -> Self {
        TagConfig {
            message: default_tag_message(),
        }
    }
}

/// Configuration for the version table.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DisplayConfig {
    /// chrono format string for commit dates
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            date_format: default_date_format(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `repo-version.toml` in current directory
/// 3. `repo-version.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    match path {
        Some(path) => {
            let content = fs::read_to_string(&path).map_err(|e| {
                VersionError::config(format!("cannot read '{}': {}", path.display(), e))
            })?;
            parse_config(&content)
                .map_err(|e| VersionError::config(format!("{}: {}", path.display(), e)))
        }
        None => Ok(Config::default()),
    }
}

/// Parse configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| VersionError::config(e.to_string()))
}

fn default_config_path() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}
