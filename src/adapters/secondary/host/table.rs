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

//! Host relationship lookups over an exported host table

use crate::domain::{DomainError, HostRef};
use crate::ports::HostRelationshipResolver;
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// A host as exported by the persistence layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostRecord {
    pub id: String,
    pub name: Option<String>,
    /// Service tag recorded on the host itself
    pub service_tag: Option<String>,
    /// Serial number of the host's hardware record
    pub serial_number: Option<String>,
}

impl HostRecord {
    fn to_ref(&self) -> HostRef {
        HostRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// In-memory host table
///
/// A key is matched against service tags first and only then against
/// hardware serial numbers.
#[derive(Debug, Clone, Default)]
pub struct HostTable {
    hosts: Vec<HostRecord>,
}

impl HostTable {
    pub fn new(hosts: Vec<HostRecord>) -> Self {
        Self { hosts }
    }

    /// Load a host table from a JSON array of host records
    pub async fn load(path: &Path) -> Result<Self, DomainError> {
        let contents = fs::read_to_string(path).await.map_err(|e| {
            DomainError::InvalidConfiguration(format!(
                "Failed to read host table {}: {}",
                path.display(),
                e
            ))
        })?;

        let hosts: Vec<HostRecord> = serde_json::from_str(&contents).map_err(|e| {
            DomainError::ParsingFailed(format!("Invalid host table {}: {}", path.display(), e))
        })?;

        debug!("Loaded {} hosts from {}", hosts.len(), path.display());
        Ok(Self::new(hosts))
    }

    /// Find a host by service tag, falling back to hardware serial number
    pub fn find(&self, key: &str) -> Option<&HostRecord> {
        self.hosts
            .iter()
            .find(|host| host.service_tag.as_deref() == Some(key))
            .or_else(|| {
                self.hosts
                    .iter()
                    .find(|host| host.serial_number.as_deref() == Some(key))
            })
    }
}

#[async_trait]
impl HostRelationshipResolver for HostTable {
    async fn lookup(&self, key: &str) -> Result<Option<HostRef>, DomainError> {
        Ok(self.find(key).map(HostRecord::to_ref))
    }
}

/// Resolver used when no host table is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHostResolver;

#[async_trait]
impl HostRelationshipResolver for NoHostResolver {
    async fn lookup(&self, _key: &str) -> Result<Option<HostRef>, DomainError> {
        Ok(None)
    }
}
