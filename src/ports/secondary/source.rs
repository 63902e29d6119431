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

use crate::domain::DomainError;
use async_trait::async_trait;
use serde_json::Value;

/// Secondary port - Raw inventory provider
///
/// This interface abstracts where raw appliance records come from: a live
/// appliance session, a captured dump, a test fixture. Records are returned as
/// untyped trees so that one malformed record cannot fail the whole batch.
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// API version reported by the appliance
    ///
    /// # Returns
    /// * `Ok(String)` - Version identifier, e.g. `"1.3"`
    /// * `Err(DomainError)` - Error obtaining the version
    async fn api_version(&self) -> Result<String, DomainError>;

    /// Collect all physical server node records
    ///
    /// # Returns
    /// * `Ok(Vec<Value>)` - Raw node records
    /// * `Err(DomainError)` - Error collecting nodes
    async fn fetch_nodes(&self) -> Result<Vec<Value>, DomainError>;

    /// Collect all configuration pattern records
    ///
    /// # Returns
    /// * `Ok(Vec<Value>)` - Raw config pattern records
    /// * `Err(DomainError)` - Error collecting config patterns
    async fn fetch_config_patterns(&self) -> Result<Vec<Value>, DomainError>;
}
