//! Configuration management for bruv
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (BRUV_*)
//! 3. Config file (~/.config/bruv/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Cache-related configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Directory holding the cache repository
    pub dir: Option<PathBuf>,
}

/// Git-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitConfig {
    /// Path to the git executable
    pub path: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            path: "git".to_string(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Cache configuration
    pub cache: CacheConfig,

    /// Git configuration
    pub git: GitConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/bruv/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bruv").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - BRUV_CACHE_DIR: Cache directory
    /// - BRUV_GIT_PATH: Path to git executable
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var("BRUV_CACHE_DIR") {
            self.cache.dir = Some(PathBuf::from(dir));
        }

        if let Ok(git_path) = std::env::var("BRUV_GIT_PATH") {
            self.git.path = git_path;
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, cache_dir: Option<PathBuf>, git_path: Option<String>) -> Self {
        if let Some(dir) = cache_dir {
            self.cache.dir = Some(dir);
        }

        if let Some(path) = git_path {
            self.git.path = path;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(cache_dir: Option<PathBuf>, git_path: Option<String>) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(cache_dir, git_path))
    }

    /// The cache directory to use, falling back to the per-user default
    pub fn cache_dir(&self) -> Result<PathBuf> {
        match &self.cache.dir {
            Some(dir) => Ok(dir.clone()),
            None => default_cache_dir(),
        }
    }
}

/// Get the default cache directory
///
/// Returns `~/.cache/bruv`
pub fn default_cache_dir() -> Result<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .ok_or_else(|| Error::Config("Could not determine cache directory".to_string()))?;

    Ok(cache_dir.join("bruv"))
}
