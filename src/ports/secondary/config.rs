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

use crate::domain::{DomainError, RefreshConfig};
use async_trait::async_trait;
use std::str::FromStr;

/// Secondary port - Configuration provider abstraction
///
/// This interface abstracts how configuration is loaded and managed,
/// allowing for different sources (CLI args, files, environment, etc.)
#[async_trait]
pub trait ConfigurationProvider: Send + Sync {
    /// Get refresh configuration
    ///
    /// # Returns
    /// * `Ok(RefreshConfig)` - Refresh configuration
    /// * `Err(DomainError)` - Error loading configuration
    async fn get_refresh_config(&self) -> Result<RefreshConfig, DomainError>;

    /// Get output format preference
    ///
    /// # Returns
    /// * `Ok(OutputFormat)` - Preferred output format
    /// * `Err(DomainError)` - Error loading configuration
    async fn get_output_format(&self) -> Result<OutputFormat, DomainError>;

    /// Check if verbose logging is enabled
    async fn is_verbose_enabled(&self) -> Result<bool, DomainError> {
        Ok(self.get_refresh_config().await?.verbose)
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    /// JSON format
    #[default]
    Json,
    /// TOML format
    Toml,
    /// Both JSON and TOML
    Both,
}

impl FromStr for OutputFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "toml" => Ok(OutputFormat::Toml),
            "both" => Ok(OutputFormat::Both),
            other => Err(DomainError::InvalidConfiguration(format!(
                "output format must be 'json', 'toml' or 'both', got '{other}'"
            ))),
        }
    }
}
