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

//! Inventory source backed by a captured appliance dump

use crate::domain::DomainError;
use crate::ports::InventorySource;
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tokio::fs;

/// Chassis node type that is a switch module, not a server
const SWITCH_MODULE_TYPE: &str = "SCU";

/// On-disk layout of a captured inventory
///
/// Nodes may be given directly, as the cabinet listing returned by the
/// appliance, or both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDump {
    /// API version of the appliance that produced the dump
    pub version: Option<String>,
    pub nodes: Option<Vec<Value>>,
    pub cabinets: Option<Vec<Value>>,
    pub config_patterns: Option<Vec<Value>>,
}

impl InventoryDump {
    /// All server nodes: direct nodes first, then nodes found in cabinets
    pub fn all_nodes(&self) -> Vec<Value> {
        let mut nodes = self.nodes.clone().unwrap_or_default();
        for cabinet in self.cabinets.iter().flatten() {
            nodes.extend(cabinet_nodes(cabinet));
        }
        nodes
    }
}

/// Flatten a JSON value that may be a single record or a list of records
fn flatten_records(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(records) => records.clone(),
        Value::Null => Vec::new(),
        record => vec![record.clone()],
    }
}

/// Server nodes of one cabinet
///
/// Standalone nodes come from `nodeList[].itemInventory`; chassis nodes come
/// from `chassisList[].itemInventory.nodes`, minus switch modules.
pub fn cabinet_nodes(cabinet: &Value) -> Vec<Value> {
    let list = |key: &str| cabinet[key].as_array().cloned().unwrap_or_default();

    let standalone = list("nodeList")
        .into_iter()
        .flat_map(|entry| flatten_records(&entry["itemInventory"]));

    let chassis = list("chassisList")
        .into_iter()
        .flat_map(|entry| flatten_records(&entry["itemInventory"]["nodes"]))
        .filter(|node| node["type"].as_str() != Some(SWITCH_MODULE_TYPE));

    standalone.chain(chassis).collect()
}

/// Inventory source reading a JSON dump file
pub struct FileInventorySource {
    dump: InventoryDump,
}

impl FileInventorySource {
    /// Wrap an already loaded dump
    pub fn new(dump: InventoryDump) -> Self {
        Self { dump }
    }

    /// Load a dump from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path of the dump file
    ///
    /// # Returns
    /// * `Ok(FileInventorySource)` - Source over the dump contents
    /// * `Err(DomainError)` - File missing or not a valid dump
    pub async fn load(path: &Path) -> Result<Self, DomainError> {
        let contents = fs::read_to_string(path).await.map_err(|e| {
            DomainError::SourceUnavailable(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let dump: InventoryDump = serde_json::from_str(&contents).map_err(|e| {
            DomainError::ParsingFailed(format!("Invalid inventory dump {}: {}", path.display(), e))
        })?;

        debug!(
            "Loaded inventory dump {} (version {:?})",
            path.display(),
            dump.version
        );
        Ok(Self::new(dump))
    }
}

#[async_trait]
impl InventorySource for FileInventorySource {
    async fn api_version(&self) -> Result<String, DomainError> {
        self.dump.version.clone().ok_or_else(|| {
            DomainError::SourceUnavailable("inventory dump does not declare an API version".to_string())
        })
    }

    async fn fetch_nodes(&self) -> Result<Vec<Value>, DomainError> {
        Ok(self.dump.all_nodes())
    }

    async fn fetch_config_patterns(&self) -> Result<Vec<Value>, DomainError> {
        Ok(self.dump.config_patterns.clone().unwrap_or_default())
    }
}
