//! Optional config file in `<config_dir>/gitlab-tools/config.toml`.
//!
//! Every key is optional; flags and environment variables take precedence
//! (see [`crate::auth`]).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "GITLAB_TOOLS_CONFIG";

/// Directory name under the platform config dir
const APP_DIR: &str = "gitlab-tools";

/// Config filename
const CONFIG_FILE: &str = "config.toml";

/// Contents of the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// GitLab instance root, e.g. `https://gitlab.example.com`
    pub base_url: Option<String>,
    /// Personal access token
    pub token: Option<String>,
    /// Default group prefix for `bulk-mr` project paths
    pub group: Option<String>,
    /// Default page size for topic project listing
    pub per_page: Option<u32>,
}

/// Resolve the config file path.
///
/// `GITLAB_TOOLS_CONFIG` wins; otherwise the platform config directory.
/// Returns `None` if neither is available.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Load the config file from its default location.
///
/// Returns an empty `FileConfig` if there is no file.
pub fn load_config() -> Result<FileConfig> {
    config_path().map_or_else(|| Ok(FileConfig::default()), |path| load_config_from(&path))
}

/// Load the config file from `path`.
///
/// Returns an empty `FileConfig` if the file doesn't exist.
pub fn load_config_from(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}
