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

use crate::domain::{PublishError, RefreshReport};
use async_trait::async_trait;
use std::path::Path;

/// Secondary port - Report repository abstraction
///
/// This interface abstracts file-based storage of refresh reports
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Save a refresh report to a file in JSON format
    ///
    /// # Arguments
    /// * `report` - The report to save
    /// * `path` - File path to save to
    ///
    /// # Returns
    /// * `Ok(())` - Report successfully saved
    /// * `Err(PublishError)` - Error occurred during save
    async fn save_json(&self, report: &RefreshReport, path: &Path) -> Result<(), PublishError>;

    /// Save a refresh report to a file in TOML format
    ///
    /// # Arguments
    /// * `report` - The report to save
    /// * `path` - File path to save to
    ///
    /// # Returns
    /// * `Ok(())` - Report successfully saved
    /// * `Err(PublishError)` - Error occurred during save
    async fn save_toml(&self, report: &RefreshReport, path: &Path) -> Result<(), PublishError>;
}
