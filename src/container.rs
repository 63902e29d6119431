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

//! Dependency injection container for inventory refresh services

use crate::adapters::{FileInventorySource, FileSystemRepository, HostTable, NoHostResolver};
use crate::domain::{DomainError, InventoryRefreshCoordinator};
use crate::ports::{
    HostRelationshipResolver, InventoryRefreshService, InventorySource, OutputFormat,
    ReportRepository,
};
use log::debug;
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for the dependency injection container
#[derive(Debug, Clone, Default)]
pub struct ContainerConfig {
    /// Inventory dump to read raw records from
    pub input_path: PathBuf,
    /// Exported host table; no host relationships without it
    pub host_table_path: Option<PathBuf>,
    /// Formats written when publishing
    pub output_format: OutputFormat,
}

/// Dependency injection container
pub struct ServiceContainer {
    config: ContainerConfig,
}

impl ServiceContainer {
    /// Create a new service container with configuration
    pub fn new(config: ContainerConfig) -> Self {
        Self { config }
    }

    /// Create the inventory source
    pub async fn create_inventory_source(&self) -> Result<Arc<dyn InventorySource>, DomainError> {
        let source = FileInventorySource::load(&self.config.input_path).await?;
        Ok(Arc::new(source))
    }

    /// Create the host relationship resolver
    pub async fn create_host_resolver(
        &self,
    ) -> Result<Arc<dyn HostRelationshipResolver>, DomainError> {
        match &self.config.host_table_path {
            Some(path) => Ok(Arc::new(HostTable::load(path).await?)),
            None => {
                debug!("No host table configured, host relationships stay empty");
                Ok(Arc::new(NoHostResolver))
            }
        }
    }

    /// Create the report repository
    pub fn create_report_repository(&self) -> Arc<dyn ReportRepository> {
        Arc::new(FileSystemRepository::new())
    }

    /// Create the complete inventory refresh service
    pub async fn create_refresh_service(
        &self,
    ) -> Result<Arc<dyn InventoryRefreshService>, DomainError> {
        let source = self.create_inventory_source().await?;
        let host_resolver = self.create_host_resolver().await?;
        let repository = self.create_report_repository();

        let service = InventoryRefreshCoordinator::new(
            source,
            host_resolver,
            repository,
            self.config.output_format,
        );

        Ok(Arc::new(service))
    }
}

/// Builder pattern for container configuration
pub struct ContainerConfigBuilder {
    config: ContainerConfig,
}

impl ContainerConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            config: ContainerConfig::default(),
        }
    }

    /// Set the inventory dump path
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.input_path = path.into();
        self
    }

    /// Set the host table path
    pub fn host_table_path(mut self, path: Option<PathBuf>) -> Self {
        self.config.host_table_path = path;
        self
    }

    /// Set the output format
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ContainerConfig {
        self.config
    }
}

impl Default for ContainerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
