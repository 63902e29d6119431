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

use crate::domain::{DomainError, HostRef};
use async_trait::async_trait;

/// Secondary port - Host relationship lookup
///
/// Implemented by the persistence layer. Lookups are read-only and carry no
/// ordering dependency between servers.
#[async_trait]
pub trait HostRelationshipResolver: Send + Sync {
    /// Find the existing host associated with a relationship key
    ///
    /// # Arguments
    /// * `key` - Relationship key of a canonical server (its serial number)
    ///
    /// # Returns
    /// * `Ok(Some(HostRef))` - A host is associated with the key
    /// * `Ok(None)` - No host matches
    /// * `Err(DomainError)` - The lookup itself failed
    async fn lookup(&self, key: &str) -> Result<Option<HostRef>, DomainError>;
}
