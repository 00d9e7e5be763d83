//! Configuration system for siteauth
//!
//! A small TOML file naming the database location, the deployment's site
//! and the provider integration to set up. Every section has defaults, so
//! running without any config file works against the standard data
//! directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::{ConfigError, CoreError};

/// Provider key used for the Keycloak OpenID Connect integration.
pub const DEFAULT_PROVIDER_KEY: &str = "geonode_openid_connect";

/// Display name of the Keycloak integration.
pub const DEFAULT_PROVIDER_NAME: &str = "Keycloak";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteAuthConfig {
    pub database: DatabaseConfig,
    pub site: SiteConfig,
    pub provider: ProviderConfig,
}

/// Database configuration for SQLite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the database directory.
    pub path: PathBuf,
}

impl DatabaseConfig {
    /// Path to the database file.
    pub fn db_file(&self) -> PathBuf {
        self.path.join(siteauth_db::DB_FILE_NAME)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("siteauth"),
        }
    }
}

/// Which site row is "this deployment".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub id: i64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { id: 1 }
    }
}

/// The provider integration key and its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub key: String,
    pub name: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_PROVIDER_KEY.to_string(),
            name: DEFAULT_PROVIDER_NAME.to_string(),
        }
    }
}

/// Resolve a path relative to a base directory
/// If the path is absolute, return it as-is
fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Load configuration from a file
///
/// A relative `database.path` is resolved against the config file's directory.
pub async fn load_config(path: &Path) -> Result<SiteAuthConfig> {
    let content =
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CoreError::ConfigurationError {
                config_path: path.display().to_string(),
                expected: "readable TOML file".to_string(),
                cause: ConfigError::Io(e.to_string()),
            })?;

    let mut config: SiteAuthConfig =
        toml::from_str(&content).map_err(|e| CoreError::ConfigurationError {
            config_path: path.display().to_string(),
            expected: "valid TOML configuration".to_string(),
            cause: ConfigError::TomlParse(e.to_string()),
        })?;

    let base_dir = path.parent().unwrap_or(Path::new("."));
    config.database.path = resolve_path(base_dir, &config.database.path);

    Ok(config)
}

/// Save configuration to a file
pub async fn save_config(config: &SiteAuthConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| CoreError::ConfigurationError {
                config_path: parent.display().to_string(),
                expected: "writable directory".to_string(),
                cause: ConfigError::Io(e.to_string()),
            })?;
    }

    let content = toml::to_string_pretty(config).map_err(|e| CoreError::ConfigurationError {
        config_path: path.display().to_string(),
        expected: "serializable config structure".to_string(),
        cause: ConfigError::TomlSerialize(e.to_string()),
    })?;

    tokio::fs::write(path, content)
        .await
        .map_err(|e| CoreError::ConfigurationError {
            config_path: path.display().to_string(),
            expected: "writable file location".to_string(),
            cause: ConfigError::Io(e.to_string()),
        })?;

    Ok(())
}

/// Standard config file locations
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // Project-specific config
    paths.push(PathBuf::from("siteauth.toml"));

    // User config directory
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("siteauth").join("config.toml"));
    }

    // Home directory fallback
    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(".siteauth").join("config.toml"));
    }

    paths
}

/// Load configuration from standard locations
pub async fn load_config_from_standard_locations() -> Result<SiteAuthConfig> {
    for path in config_paths() {
        if path.exists() {
            return load_config(&path).await;
        }
    }

    // No config found, return default
    Ok(SiteAuthConfig::default())
}
