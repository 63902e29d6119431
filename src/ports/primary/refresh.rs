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

use crate::domain::{PublishError, RefreshConfig, RefreshError, RefreshReport};
use async_trait::async_trait;

/// Primary port - Main interface offered by the inventory domain
///
/// This is what external systems (CLI, refresh schedulers, library consumers)
/// use to turn raw appliance inventory into canonical records.
#[async_trait]
pub trait InventoryRefreshService: Send + Sync {
    /// Run a complete refresh against the configured inventory source
    ///
    /// # Arguments
    /// * `config` - Options for this refresh run
    ///
    /// # Returns
    /// * `Ok(RefreshReport)` - Canonical records plus per-record failures
    /// * `Err(RefreshError)` - The run as a whole could not proceed
    async fn refresh(&self, config: RefreshConfig) -> Result<RefreshReport, RefreshError>;

    /// Store a refresh report
    ///
    /// # Arguments
    /// * `report` - The report to store
    /// * `base_path` - Destination path without extension
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Paths that were written
    /// * `Err(PublishError)` - Error occurred while storing
    async fn publish_report(
        &self,
        report: &RefreshReport,
        base_path: &str,
    ) -> Result<Vec<String>, PublishError>;
}
