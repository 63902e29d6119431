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

//! File-based repository for saving refresh reports to local files

use crate::domain::{PublishError, RefreshReport};
use crate::ports::ReportRepository;
use async_trait::async_trait;
use log::info;
use std::path::Path;
use tokio::fs;

/// File system repository for storing refresh reports
pub struct FileSystemRepository;

impl FileSystemRepository {
    /// Create a new file system repository
    pub fn new() -> Self {
        Self
    }

    async fn write(&self, path: &Path, contents: String) -> Result<(), PublishError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| PublishError::IoFailed(format!("Failed to create directory: {}", e)))?;
        }

        fs::write(path, contents).await.map_err(|e| {
            PublishError::IoFailed(format!("Failed to write {}: {}", path.display(), e))
        })?;

        info!("Wrote {}", path.display());
        Ok(())
    }
}

impl Default for FileSystemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportRepository for FileSystemRepository {
    async fn save_json(&self, report: &RefreshReport, path: &Path) -> Result<(), PublishError> {
        let json_string = serde_json::to_string_pretty(report).map_err(|e| {
            PublishError::SerializationFailed(format!("JSON serialization failed: {}", e))
        })?;
        self.write(path, json_string).await
    }

    async fn save_toml(&self, report: &RefreshReport, path: &Path) -> Result<(), PublishError> {
        let toml_string = toml::to_string_pretty(report).map_err(|e| {
            PublishError::SerializationFailed(format!("TOML serialization failed: {}", e))
        })?;
        self.write(path, toml_string).await
    }
}
