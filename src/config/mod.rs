//! Configuration module

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::format::{Item as FormatItem, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::codec::EXPORT_FILE_NAME;

/// Name of the repository directory
pub const RESMAN_DIR: &str = ".resman";

/// Environment variable overriding the database location
pub const DATABASE_ENV: &str = "RESMAN_DATABASE";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Explicit database file (overrides discovery)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// File name used by `resman export` without `-o`
    #[serde(default = "default_export_file")]
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: default_export_file(),
        }
    }
}

fn default_export_file() -> String {
    EXPORT_FILE_NAME.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// chrono format string for creation dates
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Characters of the description shown in `ls`
    #[serde(default = "default_description_width")]
    pub description_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            description_width: default_description_width(),
        }
    }
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

fn default_description_width() -> usize {
    40
}

/// True if chrono understands every specifier in `format`
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, FormatItem::Error))
}

impl DisplayConfig {
    /// Render a creation date; falls back to the default format when
    /// `date_format` cannot be rendered
    pub fn format_date(&self, dt: DateTime<Utc>) -> String {
        let mut out = String::new();
        if write!(out, "{}", dt.format(&self.date_format)).is_ok() {
            return out;
        }
        tracing::warn!(format = %self.date_format, "invalid date format, using default");
        dt.format(&default_date_format()).to_string()
    }
}

impl Config {
    /// Load config from default locations
    pub fn load() -> Result<Self> {
        // Try local config first, then global
        if let Some(local) = Self::find_local_config() {
            return Self::load_from(&local);
        }

        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                return Self::load_from(&global);
            }
        }

        Ok(Self::default())
    }

    /// Load from an explicit path if given, else from default locations
    pub fn load_with(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Check values serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if !is_valid_date_format(&self.display.date_format) {
            bail!(
                "display.date_format: unsupported format string {:?}",
                self.display.date_format
            );
        }
        Ok(())
    }

    /// Save config to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Find local .resman/config.toml walking up directories
    pub fn find_local_config() -> Option<PathBuf> {
        Self::find_upwards("config.toml")
    }

    /// Find local .resman/data.db walking up directories
    pub fn find_local_db() -> Option<PathBuf> {
        Self::find_upwards("data.db")
    }

    fn find_upwards(file: &str) -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let candidate = current.join(RESMAN_DIR).join(file);
            if candidate.exists() {
                return Some(candidate);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Global repository directory (~/.resman)
    pub fn global_dir() -> Option<PathBuf> {
        directories::UserDirs::new().map(|u| u.home_dir().join(RESMAN_DIR))
    }

    /// Get global config path (~/.resman/config.toml)
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|d| d.join("config.toml"))
    }

    /// Get global database path (~/.resman/data.db)
    pub fn global_db_path() -> Option<PathBuf> {
        Self::global_dir().map(|d| d.join("data.db"))
    }

    /// Get database path with priority:
    /// 1. RESMAN_DATABASE env var
    /// 2. `storage.database` from config
    /// 3. Local .resman/data.db (walking up from CWD)
    /// 4. Global ~/.resman/data.db
    pub fn database_path(&self) -> PathBuf {
        if let Ok(env_path) = std::env::var(DATABASE_ENV) {
            return PathBuf::from(env_path);
        }

        if let Some(db) = &self.storage.database {
            return db.clone();
        }

        if let Some(local_db) = Self::find_local_db() {
            return local_db;
        }

        // Local .resman/ exists (even without data.db yet)
        if let Some(parent) = Self::find_local_config().and_then(|c| c.parent().map(Path::to_path_buf)) {
            return parent.join("data.db");
        }

        if let Some(global) = Self::global_db_path() {
            return global;
        }

        PathBuf::from(RESMAN_DIR).join("data.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.export.file_name, "resources.json");
        assert_eq!(config.display.description_width, 40);
        assert!(config.storage.database.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[display]\ndate_format = \"%Y\"\n").unwrap();
        assert_eq!(config.display.date_format, "%Y");
        assert_eq!(config.display.description_width, 40);
        assert_eq!(config.export.file_name, "resources.json");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut config = Config::default();
        config.export.file_name = "backup.json".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_with(Some(&path)).unwrap();
        assert_eq!(loaded.export.file_name, "backup.json");
    }

    #[test]
    fn test_date_format_validation() {
        assert!(is_valid_date_format("%Y-%m-%d %H:%M"));
        assert!(is_valid_date_format("created %d/%m"));
        assert!(!is_valid_date_format("%Q"));
    }

    #[test]
    fn test_load_rejects_bad_date_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\ndate_format = \"%Q\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("date_format"));
    }

    #[test]
    fn test_format_date_falls_back() {
        let dt = Utc.timestamp_millis_opt(0).single().unwrap();
        let display = DisplayConfig {
            date_format: "%Q".to_string(),
            ..DisplayConfig::default()
        };
        assert_eq!(display.format_date(dt), "1970-01-01 00:00");

        let display = DisplayConfig {
            date_format: "%Y".to_string(),
            ..DisplayConfig::default()
        };
        assert_eq!(display.format_date(dt), "1970");
    }

    #[test]
    fn test_load_from_missing_file_errors() {
        let dir = tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join("nope.toml")).is_err());
    }
}
