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

use crate::domain::rulesets::{get_ruleset, Ruleset};
use crate::domain::{
    CanonicalConfigPattern, CanonicalServer, NormalizationFailure, NormalizeError, PublishError,
    RawConfigPattern, RawNode, RefreshConfig, RefreshError, RefreshReport,
};
use crate::ports::{
    HostRelationshipResolver, InventoryRefreshService, InventorySource, OutputFormat,
    ReportRepository,
};
use async_trait::async_trait;
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Domain service that implements an inventory refresh
///
/// This service pulls raw records from an inventory source, normalizes them
/// with the ruleset for the appliance's API version, and attaches host
/// relationships. Each record is normalized on its own; a failing record is
/// reported and skipped.
pub struct InventoryRefreshCoordinator {
    /// Raw record provider
    source: Arc<dyn InventorySource>,
    /// Persistence lookup for existing hosts
    host_resolver: Arc<dyn HostRelationshipResolver>,
    /// Storage for finished reports
    repository: Arc<dyn ReportRepository>,
    /// Formats written by `publish_report`
    output_format: OutputFormat,
}

impl InventoryRefreshCoordinator {
    /// Create a new refresh service
    ///
    /// # Arguments
    /// * `source` - Raw inventory provider
    /// * `host_resolver` - Host relationship lookup
    /// * `repository` - Report storage
    /// * `output_format` - Formats written when publishing
    pub fn new(
        source: Arc<dyn InventorySource>,
        host_resolver: Arc<dyn HostRelationshipResolver>,
        repository: Arc<dyn ReportRepository>,
        output_format: OutputFormat,
    ) -> Self {
        Self {
            source,
            host_resolver,
            repository,
            output_format,
        }
    }

    /// Determine which API version to apply
    async fn resolve_version(&self, config: &RefreshConfig) -> Result<String, RefreshError> {
        match &config.api_version {
            Some(version) => {
                debug!("Using configured API version {}", version);
                Ok(version.clone())
            }
            None => Ok(self.source.api_version().await?),
        }
    }

    /// Normalize one raw node and resolve its host relationship
    async fn normalize_node(
        &self,
        ruleset: &Ruleset,
        value: &Value,
        resolve_hosts: bool,
    ) -> Result<(String, CanonicalServer), String> {
        let node = RawNode::from_value(value).map_err(|e| e.to_string())?;
        let (id, mut server) = ruleset.normalize_server(&node).map_err(|e| e.to_string())?;

        if resolve_hosts {
            if let Some(key) = server.host_relationship_key.as_deref() {
                server.host = self
                    .host_resolver
                    .lookup(key)
                    .await
                    .map_err(|e| e.to_string())?;
            }
        }

        Ok((id, server))
    }

    /// Normalize all nodes, collecting failures instead of stopping
    async fn normalize_nodes(
        &self,
        ruleset: &Ruleset,
        nodes: &[Value],
        resolve_hosts: bool,
        failures: &mut Vec<NormalizationFailure>,
    ) -> BTreeMap<String, CanonicalServer> {
        let mut servers = BTreeMap::new();

        for (index, value) in nodes.iter().enumerate() {
            match self.normalize_node(ruleset, value, resolve_hosts).await {
                Ok((id, server)) => {
                    debug!(
                        "Normalized server {} with {} guest devices",
                        id,
                        server.hardware.guest_devices.len()
                    );
                    if servers.insert(id.clone(), server).is_some() {
                        warn!("Duplicate server id {}, keeping the later record", id);
                    }
                }
                Err(reason) => {
                    warn!("Skipping physical server #{}: {}", index, reason);
                    failures.push(NormalizationFailure {
                        record: "physical server".to_string(),
                        index,
                        reason,
                    });
                }
            }
        }

        servers
    }

    /// Normalize all config patterns, collecting failures instead of stopping
    fn normalize_config_patterns(
        &self,
        ruleset: &Ruleset,
        patterns: &[Value],
        failures: &mut Vec<NormalizationFailure>,
    ) -> BTreeMap<String, CanonicalConfigPattern> {
        let mut normalized = BTreeMap::new();

        for (index, value) in patterns.iter().enumerate() {
            let result = RawConfigPattern::from_value(value)
                .and_then(|pattern| ruleset.normalize_config_pattern(&pattern));

            match result {
                Ok((id, pattern)) => {
                    normalized.insert(id, pattern);
                }
                Err(err) => {
                    warn!("Skipping config pattern #{}: {}", index, err);
                    failures.push(failure("config pattern", index, &err));
                }
            }
        }

        normalized
    }
}

fn failure(record: &str, index: usize, err: &NormalizeError) -> NormalizationFailure {
    NormalizationFailure {
        record: record.to_string(),
        index,
        reason: err.to_string(),
    }
}

#[async_trait]
impl InventoryRefreshService for InventoryRefreshCoordinator {
    async fn refresh(&self, config: RefreshConfig) -> Result<RefreshReport, RefreshError> {
        let api_version = self.resolve_version(&config).await?;
        let ruleset = get_ruleset(&api_version)?;
        info!("Refreshing inventory with ruleset {}", ruleset.version);

        // Collect nodes and config patterns concurrently
        let (nodes_result, patterns_result) = tokio::join!(
            self.source.fetch_nodes(),
            async {
                if config.include_config_patterns {
                    self.source.fetch_config_patterns().await
                } else {
                    Ok(Vec::new())
                }
            }
        );
        let nodes = nodes_result?;
        let patterns = patterns_result?;

        let mut failures = Vec::new();
        let physical_servers = self
            .normalize_nodes(ruleset, &nodes, config.resolve_hosts, &mut failures)
            .await;
        let config_patterns = self.normalize_config_patterns(ruleset, &patterns, &mut failures);

        info!(
            "Normalized {} of {} servers and {} of {} config patterns",
            physical_servers.len(),
            nodes.len(),
            config_patterns.len(),
            patterns.len()
        );

        Ok(RefreshReport {
            api_version,
            physical_servers,
            config_patterns,
            failures,
        })
    }

    async fn publish_report(
        &self,
        report: &RefreshReport,
        base_path: &str,
    ) -> Result<Vec<String>, PublishError> {
        let mut written = Vec::new();

        if matches!(self.output_format, OutputFormat::Json | OutputFormat::Both) {
            let path = format!("{base_path}.json");
            self.repository.save_json(report, Path::new(&path)).await?;
            written.push(path);
        }
        if matches!(self.output_format, OutputFormat::Toml | OutputFormat::Both) {
            let path = format!("{base_path}.toml");
            self.repository.save_toml(report, Path::new(&path)).await?;
            written.push(path);
        }

        Ok(written)
    }
}
