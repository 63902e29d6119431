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

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Canonical physical server record (root aggregate)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CanonicalServer {
    /// Display name
    pub name: Option<String>,
    /// Appliance reference (node UUID)
    pub ems_ref: String,
    /// Appliance unique id (node UUID)
    pub uid_ems: String,
    pub hostname: Option<String>,
    pub product_name: Option<String>,
    pub manufacturer: Option<String>,
    pub machine_type: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub field_replaceable_unit: Option<String>,
    /// Vendor tag of the ruleset that produced this record
    pub vendor: String,
    pub power_state: PowerState,
    pub health_state: HealthState,
    /// Token the persistence layer uses to find an existing host
    pub host_relationship_key: Option<String>,
    /// Host associated through `host_relationship_key`, filled during refresh
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<HostRef>,
    /// State of the identify LED
    pub location_led_state: Option<String>,
    pub asset_details: AssetDetails,
    pub hardware: Hardware,
}

/// Canonical power state vocabulary
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    #[serde(rename = "on")]
    On,
    #[serde(rename = "off")]
    Off,
    Standby,
    Unknown,
}

impl PowerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerState::On => "on",
            PowerState::Off => "off",
            PowerState::Standby => "Standby",
            PowerState::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical health state vocabulary
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    Valid,
    Warning,
    Critical,
    /// The appliance explicitly reported an unknown health
    None,
    /// No health information was available
    Unknown,
}

impl HealthState {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthState::Valid => "Valid",
            HealthState::Warning => "Warning",
            HealthState::Critical => "Critical",
            HealthState::None => "None",
            HealthState::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical placement and ownership details
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct AssetDetails {
    pub contact: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub room: Option<String>,
    pub rack_name: Option<String>,
    pub lowest_rack_unit: String,
}

/// Aggregated hardware inventory
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Hardware {
    /// Total installed memory in megabytes
    pub memory_mb: u64,
    /// Sum of cores over all processors
    pub cpu_total_cores: u64,
    /// Total disk capacity; absent when nothing was reported
    pub disk_capacity: Option<u64>,
    pub firmwares: Vec<Firmware>,
    pub guest_devices: Vec<GuestDevice>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Firmware {
    /// `"<role> <name>-<status>"`
    pub name: String,
    pub build: Option<String>,
    pub version: Option<String>,
    pub release_date: Option<String>,
}

/// Device attached to a server
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "device_type")]
pub enum GuestDevice {
    #[serde(rename = "ethernet")]
    NetworkAdapter(NetworkAdapter),
    #[serde(rename = "management")]
    Management(ManagementDevice),
}

/// Logical network adapter, possibly assembled from several raw records
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct NetworkAdapter {
    pub device_name: Option<String>,
    pub firmwares: Vec<Firmware>,
    pub manufacturer: Option<String>,
    pub field_replaceable_unit: Option<String>,
    /// `"Bay <slotNumber>"`
    pub location: String,
    pub child_devices: Vec<Port>,
}

impl NetworkAdapter {
    /// Whether two adapter records describe the same physical card
    ///
    /// Matching is on name OR bay. Two distinct cards of the same model in
    /// different bays are therefore merged.
    pub fn same_device(&self, other: &NetworkAdapter) -> bool {
        self.device_name == other.device_name || self.location == other.location
    }
}

/// Port type marker, always `physical_port`
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub enum PortType {
    #[default]
    #[serde(rename = "physical_port")]
    PhysicalPort,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Port {
    pub device_type: PortType,
    /// `"Physical Port <index>"`
    pub device_name: String,
    /// Colon separated hardware address
    pub address: Option<String>,
}

/// Management controller of the server
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ManagementDevice {
    pub network: ManagementNetwork,
    /// MAC address as reported by the appliance
    pub address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ManagementNetwork {
    pub ipaddress: Option<String>,
    /// IPv6 addresses joined with `", "`
    pub ipv6address: Option<String>,
}

/// Canonical configuration pattern
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CanonicalConfigPattern {
    pub manager_ref: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub user_defined: bool,
    pub in_use: bool,
}

/// Reference to an existing host known to the persistence layer
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HostRef {
    pub id: String,
    pub name: Option<String>,
}

/// Result of one refresh run
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct RefreshReport {
    /// API version whose ruleset was applied
    pub api_version: String,
    /// Servers keyed by external id
    pub physical_servers: BTreeMap<String, CanonicalServer>,
    /// Config patterns keyed by external id
    pub config_patterns: BTreeMap<String, CanonicalConfigPattern>,
    /// Records that could not be normalized
    pub failures: Vec<NormalizationFailure>,
}

impl RefreshReport {
    /// Total number of network adapters over all servers
    pub fn total_network_adapters(&self) -> usize {
        self.physical_servers
            .values()
            .flat_map(|server| server.hardware.guest_devices.iter())
            .filter(|device| matches!(device, GuestDevice::NetworkAdapter(_)))
            .count()
    }
}

/// A single record that failed normalization
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NormalizationFailure {
    /// Kind of record, e.g. `physical server`
    pub record: String,
    /// Position of the record in the source collection
    pub index: usize,
    pub reason: String,
}

/// Configuration for a refresh run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Force a ruleset version instead of asking the source
    pub api_version: Option<String>,
    /// Also normalize configuration patterns
    pub include_config_patterns: bool,
    /// Resolve host relationships through the resolver
    pub resolve_hosts: bool,
    /// Enable verbose output
    pub verbose: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            api_version: None,
            include_config_patterns: true,
            resolve_hosts: true,
            verbose: false,
        }
    }
}
