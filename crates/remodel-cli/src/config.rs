//! Configuration management for the CLI
//!
//! Configuration is read from one file (YAML, JSON or TOML, by extension),
//! either the one named on the command line or the first default location
//! that exists, then adjusted from environment variables.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output even without `--pretty`
    pub pretty: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (compact, full, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

/// Serialization format of a file, chosen by its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
    Toml,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("toml") => FileFormat::Toml,
            _ => FileFormat::Json,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FileFormat::Json => "JSON",
            FileFormat::Yaml => "YAML",
            FileFormat::Toml => "TOML",
        }
    }
}

/// Read and deserialize `path` according to its extension
pub fn read_document<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    let format = FileFormat::from_path(path);
    let invalid = |message: String| Error::InvalidFormat {
        path: path.to_path_buf(),
        expected: format.name().to_string(),
        message,
    };

    match format {
        FileFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| invalid(e.to_string())),
        FileFormat::Toml => toml::from_str(&content).map_err(|e| invalid(e.to_string())),
        FileFormat::Json => serde_json::from_str(&content).map_err(|e| invalid(e.to_string())),
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        read_document(path).map_err(|e| match e {
            Error::InvalidFormat { path, message, .. } => {
                Error::config(format!("{}: {}", path.display(), message))
            }
            other => other,
        })
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::load()?,
        };
        config.merge_with_env();
        Ok(config)
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        vec![
            PathBuf::from(".remodel.yaml"),
            PathBuf::from(".remodel.json"),
            PathBuf::from("remodel.toml"),
        ]
    }

    /// Apply environment overrides
    pub fn merge_with_env(&mut self) {
        if let Ok(format) = std::env::var("REMODEL_LOG_FORMAT") {
            self.logging.format = format.to_lowercase();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_sections_use_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "output:\n  pretty: true\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(config.output.pretty);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_format_follows_extension() {
        let dir = TempDir::new().unwrap();

        let toml_path = dir.path().join("remodel.toml");
        fs::write(&toml_path, "[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(Config::from_file(&toml_path).unwrap().logging.level, "debug");

        let json_path = dir.path().join("config.json");
        fs::write(&json_path, r#"{"logging": {"format": "json"}}"#).unwrap();
        assert_eq!(Config::from_file(&json_path).unwrap().logging.format, "json");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Config::from_file(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = Config::from_file(Path::new("/nonexistent/remodel.toml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
