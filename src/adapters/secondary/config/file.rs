/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Configuration loaded from a TOML file
//!
//! ```toml
//! [refresh]
//! api_version = "1.3"
//! include_config_patterns = true
//! resolve_hosts = true
//!
//! [output]
//! format = "both"
//! ```

use crate::domain::{DomainError, RefreshConfig};
use crate::ports::{ConfigurationProvider, OutputFormat};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    refresh: RefreshConfig,
    output: OutputSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OutputSection {
    format: Option<String>,
}

/// Configuration provider backed by a TOML file
#[derive(Debug, Clone)]
pub struct FileConfigurationProvider {
    refresh: RefreshConfig,
    output_format: OutputFormat,
}

impl FileConfigurationProvider {
    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, DomainError> {
        let file: ConfigFile = toml::from_str(contents)
            .map_err(|e| DomainError::InvalidConfiguration(format!("Invalid config: {}", e)))?;

        let output_format = match file.output.format.as_deref() {
            Some(format) => format.parse()?,
            None => OutputFormat::default(),
        };

        Ok(Self {
            refresh: file.refresh,
            output_format,
        })
    }

    /// Load configuration from a TOML file
    pub async fn load(path: &Path) -> Result<Self, DomainError> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::InvalidConfiguration(format!(
                "Failed to read config {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&contents)
    }
}

#[async_trait]
impl ConfigurationProvider for FileConfigurationProvider {
    async fn get_refresh_config(&self) -> Result<RefreshConfig, DomainError> {
        Ok(self.refresh.clone())
    }

    async fn get_output_format(&self) -> Result<OutputFormat, DomainError> {
        Ok(self.output_format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_full_config() {
        let provider = FileConfigurationProvider::from_toml_str(
            r#"
            [refresh]
            api_version = "1.3"
            include_config_patterns = false
            verbose = true

            [output]
            format = "toml"
            "#,
        )
        .unwrap();

        let config = provider.get_refresh_config().await.unwrap();
        assert_eq!(config.api_version.as_deref(), Some("1.3"));
        assert!(!config.include_config_patterns);
        assert!(config.resolve_hosts);
        assert!(provider.is_verbose_enabled().await.unwrap());
        assert_eq!(provider.get_output_format().await.unwrap(), OutputFormat::Toml);
    }

    #[tokio::test]
    async fn test_empty_config_uses_defaults() {
        let provider = FileConfigurationProvider::from_toml_str("").unwrap();
        assert_eq!(
            provider.get_refresh_config().await.unwrap(),
            RefreshConfig::default()
        );
        assert_eq!(provider.get_output_format().await.unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            FileConfigurationProvider::from_toml_str("[output]\nformat = \"yaml\""),
            Err(DomainError::InvalidConfiguration(_))
        ));
        assert!(FileConfigurationProvider::from_toml_str("refresh = 3").is_err());
    }
}
