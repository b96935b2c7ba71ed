//! Configuration file discovery and loading.
//!
//! A project config lives at `.devsetup/config.yml`. It is optional: without
//! one, devsetup runs with the built-in component table and default settings.

use crate::config::schema::SetupConfig;
use crate::error::{Result, SetupError};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding devsetup's project files.
pub const CONFIG_DIR: &str = ".devsetup";

/// Locations devsetup looks at for configuration.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .devsetup/config.yml
    pub project: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: Self::find_project_config(project_root),
        }
    }

    /// Find project config at .devsetup/config.yml
    fn find_project_config(project_root: &Path) -> Option<PathBuf> {
        let path = project_root.join(CONFIG_DIR).join("config.yml");
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    /// Check if any project config exists.
    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

/// Load a single config file and parse it into SetupConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<SetupConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SetupError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SetupError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into SetupConfig.
///
/// An empty document yields the default config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<SetupConfig> {
    if content.trim().is_empty() {
        return Ok(SetupConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| SetupError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// An explicit override must exist. Otherwise the project config is used
/// when present, and defaults when not.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<SetupConfig> {
    if let Some(override_path) = config_override {
        return load_config_file(override_path);
    }

    match ConfigPaths::discover(project_root).project {
        Some(path) => load_config_file(&path),
        None => Ok(SetupConfig::default()),
    }
}
