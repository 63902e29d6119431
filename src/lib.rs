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

//! LXCA Inventory Library
//!
//! This library turns raw server inventory reported by a Lenovo XClarity
//! management appliance into canonical asset records, using a Ports and
//! Adapters (Hexagonal) architecture.
//!
//! # Architecture
//!
//! - **Domain**: Raw records, canonical entities, parsers and version rulesets
//! - **Ports**: Interfaces for inventory sources, host lookups and report storage
//! - **Adapters**: File-backed implementations of the ports
//!
//! # Usage
//!
//! ```rust,no_run
//! use lxca_inventory::{ContainerConfigBuilder, InventoryRefreshService, ServiceContainer};
//! use lxca_inventory::domain::RefreshConfig;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ContainerConfigBuilder::new()
//!         .input_path("inventory_dump.json")
//!         .build();
//!     let service = ServiceContainer::new(config).create_refresh_service().await?;
//!
//!     let report = service.refresh(RefreshConfig::default()).await?;
//!     for (id, server) in &report.physical_servers {
//!         println!("{}: {} ({})", id, server.power_state, server.health_state);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Single records can be normalized without any adapters:
//!
//! ```rust
//! use lxca_inventory::domain::{get_ruleset, RawNode};
//!
//! let node = RawNode::from_value(&serde_json::json!({
//!     "uuid": "A1",
//!     "powerStatus": 8,
//!     "cmmHealthState": "Normal"
//! }))
//! .unwrap();
//! let (id, server) = get_ruleset("1.3").unwrap().normalize_server(&node).unwrap();
//! assert_eq!(id, "A1");
//! assert_eq!(server.power_state.as_str(), "on");
//! ```

pub mod adapters;
pub mod container;
pub mod domain;
pub mod ports;

pub use adapters::{
    FileConfigurationProvider, FileInventorySource, FileSystemRepository, HostTable,
    NoHostResolver,
};
pub use container::{ContainerConfig, ContainerConfigBuilder, ServiceContainer};
pub use domain::{NormalizeError, PublishError, RefreshConfig, RefreshError, RefreshReport};
pub use ports::{
    ConfigurationProvider, HostRelationshipResolver, InventoryRefreshService, InventorySource,
    OutputFormat, ReportRepository,
};
