//! Configuration loading and management.
//!
//! Configuration can be loaded from TOML, YAML or JSON files, discovered from
//! the working directory hierarchy, or built programmatically. The container
//! names are not part of the configuration; see [`crate::core::naming`].

use crate::{MedallionError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name searched for by [`MedallionConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "medallion.toml";

/// Main configuration.
///
/// # Example
///
/// ```rust
/// use medallion::core::config::{EmptyTextPolicy, MedallionConfig};
///
/// let config = MedallionConfig::default();
/// assert_eq!(config.empty_text, EmptyTextPolicy::Accept);
/// assert_eq!(config.server.port, 8000);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MedallionConfig {
    /// Blob storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// How a document that parses but contains no text is reported
    #[serde(default)]
    pub empty_text: EmptyTextPolicy,

    /// HTTP server settings (used by `serve`)
    #[serde(default)]
    pub server: ServerConfig,
}

/// Filesystem blob store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one sub-directory per container
    #[serde(default = "default_storage_root")]
    pub root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
        }
    }
}

/// Treatment of documents that parse successfully but yield no characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyTextPolicy {
    /// Write an empty text blob and count the document as processed.
    #[default]
    Accept,
    /// Report the document as an extraction failure and write nothing.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_storage_root() -> PathBuf {
    PathBuf::from("./data")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl MedallionConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `MedallionError::Validation` if the file cannot be read or is invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        toml::from_str(&content)
            .map_err(|e| MedallionError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        serde_yaml_ng::from_str(&content)
            .map_err(|e| MedallionError::validation(format!("Invalid YAML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        serde_json::from_str(&content)
            .map_err(|e| MedallionError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration, choosing the format from the file extension.
    ///
    /// `.toml`, `.yaml`/`.yml` and `.json` are recognised.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(MedallionError::validation(format!(
                "Unsupported config file format: {} (expected .toml, .yaml, .yml or .json)",
                path.display()
            ))),
        }
    }

    /// Discover `medallion.toml` in the current directory or one of its parents.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let current = std::env::current_dir().map_err(MedallionError::Io)?;
        Self::discover_from(current)
    }

    /// Same as [`discover`](Self::discover) but starting at `start`.
    pub fn discover_from(start: impl AsRef<Path>) -> Result<Option<Self>> {
        let mut current = start.as_ref().to_path_buf();

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                tracing::debug!("Discovered config file at {}", candidate.display());
                return Ok(Some(Self::from_toml_file(candidate)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| MedallionError::validation(format!("Failed to read config file {}: {}", path.display(), e)))
}
