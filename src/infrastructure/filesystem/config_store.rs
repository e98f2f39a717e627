use std::fs;
use std::path::{Path, PathBuf};
use serde_yaml::{Mapping, Value};
use thiserror::Error;
use tracing::debug;

use crate::domain::entities::connection_config::{ConfigDocument, ConnectionConfig};

/// Default name of the configuration file at the project root
pub const DEFAULT_CONFIG_NAME: &str = ".sqlcl-wrapper.config";

/// Configuration store related errors
#[derive(Debug, Error)]
pub enum ConfigStoreError {
    #[error("Configuration file not found at path: {}", .0.display())]
    ConfigFileNotFound(PathBuf),

    #[error("Configuration file read failed: {0}")]
    ReadFailed(String),

    #[error("Configuration file write failed: {0}")]
    WriteFailed(String),

    #[error("YAML parsing failed: {0}")]
    YamlParsingFailed(String),

    #[error("YAML serialization failed: {0}")]
    YamlSerializationFailed(String),

    #[error("Configuration document must be a key-value mapping: {}", .0.display())]
    NotAMapping(PathBuf),
}

/// Configuration store for the project-root YAML configuration file
pub struct ConfigStore {
    /// File name, resolved against the project root
    config_name: String,
}

impl ConfigStore {
    /// Create a new configuration store with the default file name
    pub fn new() -> Self {
        Self::with_config_name(DEFAULT_CONFIG_NAME)
    }

    /// Create a new configuration store for a custom file name
    pub fn with_config_name(config_name: impl Into<String>) -> Self {
        Self {
            config_name: config_name.into(),
        }
    }

    pub fn config_name(&self) -> &str {
        &self.config_name
    }

    /// Location of the configuration file under `project_root`
    pub fn config_path<P: AsRef<Path>>(&self, project_root: P) -> PathBuf {
        project_root.as_ref().join(&self.config_name)
    }

    /// Read the configuration document, keeping key order
    pub fn read_document<P: AsRef<Path>>(
        &self,
        project_root: P,
    ) -> Result<ConfigDocument, ConfigStoreError> {
        let config_path = self.config_path(project_root);

        if !config_path.exists() {
            return Err(ConfigStoreError::ConfigFileNotFound(config_path));
        }

        let contents = fs::read_to_string(&config_path)
            .map_err(|e| ConfigStoreError::ReadFailed(e.to_string()))?;

        let value: Value = serde_yaml::from_str(&contents)
            .map_err(|e| ConfigStoreError::YamlParsingFailed(e.to_string()))?;

        let mapping = match value {
            Value::Mapping(mapping) => mapping,
            // an empty file parses as null
            Value::Null => Mapping::new(),
            _ => return Err(ConfigStoreError::NotAMapping(config_path)),
        };

        debug!("Loaded {} key(s) from {}", mapping.len(), config_path.display());
        Ok(ConfigDocument::from_mapping(mapping))
    }

    /// Read the typed connection configuration
    pub fn read_config<P: AsRef<Path>>(
        &self,
        project_root: P,
    ) -> Result<ConnectionConfig, ConfigStoreError> {
        self.read_document(project_root)?
            .to_connection_config()
            .map_err(|e| ConfigStoreError::YamlParsingFailed(e.to_string()))
    }

    /// Write the document as plain `key: value` lines, overwriting any existing file
    pub fn write_plain<P: AsRef<Path>>(
        &self,
        project_root: P,
        document: &ConfigDocument,
    ) -> Result<PathBuf, ConfigStoreError> {
        let config_path = self.config_path(project_root);

        fs::write(&config_path, document.render_plain())
            .map_err(|e| ConfigStoreError::WriteFailed(e.to_string()))?;

        Ok(config_path)
    }

    /// Serialize the whole document back to YAML
    pub fn write_document<P: AsRef<Path>>(
        &self,
        project_root: P,
        document: &ConfigDocument,
    ) -> Result<PathBuf, ConfigStoreError> {
        let config_path = self.config_path(project_root);

        let yaml_content = serde_yaml::to_string(document.mapping())
            .map_err(|e| ConfigStoreError::YamlSerializationFailed(e.to_string()))?;

        fs::write(&config_path, yaml_content)
            .map_err(|e| ConfigStoreError::WriteFailed(e.to_string()))?;

        Ok(config_path)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
