// SPDX-License-Identifier: PMPL-1.0-or-later

//! Where resources live and how they are loaded.
//!
//! Values come from, in increasing priority: built-in defaults, a YAML (or
//! JSON) config file, the `TS_CATALOG_DIR` / `TS_CATALOG_LOCALE`
//! environment variables, and finally CLI flags applied by the caller.

use crate::catalog::LoadOptions;
use crate::error::{ResourceError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "ts-catalog.yaml";
pub const ENV_DIR: &str = "TS_CATALOG_DIR";
pub const ENV_LOCALE: &str = "TS_CATALOG_LOCALE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub resource_dir: PathBuf,
    pub file_prefix: Option<String>,
    pub default_locale: String,
    pub strip_direction_marks: bool,
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        let options = LoadOptions::default();
        Self {
            resource_dir: PathBuf::from("translations"),
            file_prefix: options.file_prefix,
            default_locale: "en".to_string(),
            strip_direction_marks: options.strip_direction_marks,
            max_depth: options.max_depth,
        }
    }
}

impl Config {
    /// Read `path`, or `ts-catalog.yaml` in the working directory if it
    /// exists, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&raw).map_err(|e| e.to_string()),
            _ => serde_yaml::from_str(&raw).map_err(|e| e.to_string()),
        };
        let config: Config = parsed.map_err(|message| ResourceError::Config {
            path: path.to_path_buf(),
            message,
        })?;
        config.validate(path)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Override fields from environment variables; empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DIR).filter(|v| !v.is_empty()) {
            self.resource_dir = PathBuf::from(dir);
        }
        if let Some(locale) = lookup(ENV_LOCALE).filter(|v| !v.is_empty()) {
            self.default_locale = locale;
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            strip_direction_marks: self.strip_direction_marks,
            max_depth: self.max_depth,
            file_prefix: self.file_prefix.clone(),
        }
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.max_depth == 0 {
            return Err(ResourceError::Config {
                path: path.to_path_buf(),
                message: "max_depth must be at least 1".to_string(),
            });
        }
        if let Some(prefix) = &self.file_prefix {
            if prefix.is_empty() {
                return Err(ResourceError::Config {
                    path: path.to_path_buf(),
                    message: "file_prefix must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.resource_dir, PathBuf::from("translations"));
        assert_eq!(config.default_locale, "en");
        assert_eq!(config.load_options(), LoadOptions::default());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ts-catalog.yaml");
        fs::write(&path, "resource_dir: i18n\nfile_prefix: dsnote\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.resource_dir, PathBuf::from("i18n"));
        assert_eq!(config.file_prefix.as_deref(), Some("dsnote"));
        assert!(config.strip_direction_marks);
        assert_eq!(config.max_depth, 2);
    }

    #[test]
    fn json_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, r#"{"default_locale": "fr", "strip_direction_marks": false}"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.default_locale, "fr");
        assert!(!config.load_options().strip_direction_marks);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ts-catalog.yaml");
        fs::write(&path, "resource_directory: i18n\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, ResourceError::Config { .. }));
        assert_eq!(err.path(), Some(path.as_path()));
    }

    #[test]
    fn zero_depth_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ts-catalog.yaml");
        fs::write(&path, "max_depth: 0\n").unwrap();
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::from_file(Path::new("/nonexistent/ts-catalog.yaml")).unwrap_err();
        assert!(matches!(err, ResourceError::Io { .. }));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = Config {
            resource_dir: PathBuf::from("from-file"),
            ..Config::default()
        };
        config.apply_env(|key| match key {
            ENV_DIR => Some("/srv/translations".to_string()),
            ENV_LOCALE => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.resource_dir, PathBuf::from("/srv/translations"));
        assert_eq!(config.default_locale, "en");
    }
}
