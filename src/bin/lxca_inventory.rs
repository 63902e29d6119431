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

use clap::Parser;
use log::{debug, warn};
use lxca_inventory::domain::RefreshConfig;
use lxca_inventory::{
    ConfigurationProvider, ContainerConfigBuilder, FileConfigurationProvider,
    InventoryRefreshService, OutputFormat, ServiceContainer,
};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lxca_inventory", version, about)]
struct Opt {
    /// Inventory dump captured from the management appliance
    #[arg(long)]
    input: PathBuf,

    /// Exported host table used to link servers to existing hosts
    #[arg(long)]
    hosts: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// API version to normalize with instead of the one declared by the dump
    #[arg(long)]
    api_version: Option<String>,

    /// Do not normalize config patterns
    #[arg(long)]
    skip_config_patterns: bool,

    /// Base path of the written report, without extension
    #[arg(long, default_value = "inventory_report")]
    output: String,

    /// Output file format (json, toml or both)
    #[arg(long)]
    format: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Read the configuration file, if any, and apply command line overrides
async fn resolve_config(opt: &Opt) -> Result<(RefreshConfig, OutputFormat), Box<dyn Error>> {
    let (mut refresh, mut format) = match &opt.config {
        Some(path) => {
            let provider = FileConfigurationProvider::load(path).await?;
            (
                provider.get_refresh_config().await?,
                provider.get_output_format().await?,
            )
        }
        None => (RefreshConfig::default(), OutputFormat::default()),
    };

    if let Some(version) = &opt.api_version {
        refresh.api_version = Some(version.clone());
    }
    if opt.skip_config_patterns {
        refresh.include_config_patterns = false;
    }
    if opt.verbose {
        refresh.verbose = true;
    }
    if let Some(value) = &opt.format {
        format = value.parse()?;
    }

    Ok((refresh, format))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::parse();
    let (refresh_config, output_format) = resolve_config(&opt).await?;

    let level = if refresh_config.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    debug!("Refresh configuration: {:?}", refresh_config);

    let container_config = ContainerConfigBuilder::new()
        .input_path(&opt.input)
        .host_table_path(opt.hosts.clone())
        .output_format(output_format)
        .build();
    let service = ServiceContainer::new(container_config)
        .create_refresh_service()
        .await?;

    let report = service.refresh(refresh_config).await?;

    println!("Inventory Summary:");
    println!("==================");
    println!("API version: {}", report.api_version);
    println!("Physical servers: {}", report.physical_servers.len());
    println!("Network adapters: {}", report.total_network_adapters());
    println!("Config patterns: {}", report.config_patterns.len());
    for (id, server) in &report.physical_servers {
        println!(
            "  {} {} [{}/{}] host: {}",
            id,
            server.name.as_deref().unwrap_or("-"),
            server.power_state,
            server.health_state,
            server
                .host
                .as_ref()
                .map(|host| host.id.as_str())
                .unwrap_or("none")
        );
    }

    if !report.failures.is_empty() {
        warn!("{} records could not be normalized", report.failures.len());
        println!("Failures: {}", report.failures.len());
        for failure in &report.failures {
            println!("  {} #{}: {}", failure.record, failure.index, failure.reason);
        }
    }

    for path in service.publish_report(&report, &opt.output).await? {
        println!("Report written to {}", path);
    }

    Ok(())
}
