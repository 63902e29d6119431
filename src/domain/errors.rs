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

use thiserror::Error;

/// Errors raised while normalizing a single record or selecting a ruleset
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NormalizeError {
    /// No ruleset is registered for the requested API version
    #[error("unsupported version '{version}' (supported: {})", supported.join(", "))]
    UnsupportedVersion {
        version: String,
        supported: Vec<String>,
    },
    /// The record has no identifier to key the canonical record by
    #[error("{0} record has no identifier")]
    MissingIdentifier(&'static str),
    /// The record tree does not have the expected shape
    #[error("malformed {record} record: {reason}")]
    MalformedRecord {
        record: &'static str,
        reason: String,
    },
}

/// Domain-level errors that don't expose infrastructure details
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// Raw inventory could not be obtained
    #[error("Inventory source unavailable: {0}")]
    SourceUnavailable(String),
    /// Data parsing failed
    #[error("Data parsing failed: {0}")]
    ParsingFailed(String),
    /// Invalid configuration provided
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Host relationship lookup failed
    #[error("Host lookup failed: {0}")]
    HostLookupFailed(String),
}

/// Errors specific to a refresh run
#[derive(Debug, Clone, Error)]
pub enum RefreshError {
    /// Domain operation failed
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// Ruleset selection failed
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Errors specific to storing refresh reports
#[derive(Debug, Clone, Error)]
pub enum PublishError {
    /// Domain operation failed
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// File system operation failed
    #[error("I/O operation failed: {0}")]
    IoFailed(String),
    /// Serialization failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),
}
