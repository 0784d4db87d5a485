//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the storage file location
pub const STORAGE_PATH_ENV: &str = "FORMWIZARD_STORAGE_PATH";

/// Default log filter
const DEFAULT_LOG_LEVEL: &str = "formwizard_tui=info";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Location of the storage file
    pub storage_path: Option<PathBuf>,
    /// Ask before deleting a submission
    pub confirm_delete: Option<bool>,
    /// Write logs to the data directory instead of stderr
    pub log_to_file: Option<bool>,
    /// Log filter used when RUST_LOG is unset
    pub log_level: Option<String>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "formwizard", "formwizard-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the storage file and logs
    pub fn data_dir() -> PathBuf {
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".formwizard"))
    }

    /// Load configuration from the file at `path`; a missing file yields
    /// defaults
    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: TuiConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is
    /// unreadable or malformed
    pub fn load_or_default() -> Self {
        Self::config_path()
            .map(|path| Self::load_or_default_from(&path))
            .unwrap_or_default()
    }

    fn load_or_default_from(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            // Logging is configured from this file, so it is not up yet
            eprintln!("Ignoring invalid configuration {}: {e}", path.display());
            Self::default()
        })
    }

    /// Storage file location: environment, then config, then data dir
    pub fn resolved_storage_path(&self) -> PathBuf {
        self.storage_path_with_env(std::env::var_os(STORAGE_PATH_ENV).map(PathBuf::from))
    }

    fn storage_path_with_env(&self, env_path: Option<PathBuf>) -> PathBuf {
        env_path
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| self.storage_path.clone())
            .unwrap_or_else(|| Self::data_dir().join("storage.json"))
    }

    pub fn logs_path(&self) -> PathBuf {
        Self::data_dir().join("logs")
    }

    pub fn confirm_delete(&self) -> bool {
        self.confirm_delete.unwrap_or(true)
    }

    pub fn log_to_file(&self) -> bool {
        self.log_to_file.unwrap_or(true)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
