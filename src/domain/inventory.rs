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

//! Raw inventory records as returned by the management appliance
//!
//! Every field is optional: the appliance omits keys freely and sends `null`
//! for values it does not know. Lists are `Option<Vec<_>>` rather than
//! defaulted vectors so that an explicit `null` deserializes as well as a
//! missing key.

use crate::domain::NormalizeError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A physical server node
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub hostname: Option<String>,
    pub serial_number: Option<String>,
    #[serde(rename = "FRU")]
    pub fru: Option<String>,
    pub product_name: Option<String>,
    pub manufacturer: Option<String>,
    pub machine_type: Option<String>,
    pub model: Option<String>,
    pub contact: Option<String>,
    pub description: Option<String>,
    /// Integer power code (8 = on, 5 = off, 18 = standby)
    pub power_status: Option<i64>,
    /// Health code string, compared case-insensitively
    pub cmm_health_state: Option<String>,
    pub location: Option<RawLocation>,
    pub leds: Option<Vec<RawLed>>,
    pub processors: Option<Vec<RawProcessor>>,
    pub memory_modules: Option<Vec<RawMemoryModule>>,
    pub raid_settings: Option<Vec<RawStorage>>,
    pub firmware: Option<Vec<RawFirmware>>,
    pub addin_cards: Option<Vec<RawAdapterRecord>>,
    pub pci_devices: Option<Vec<RawAdapterRecord>>,
    pub mac_address: Option<String>,
    #[serde(rename = "mgmtProcIPaddress")]
    pub mgmt_proc_ip_address: Option<String>,
    pub ipv6_addresses: Option<Vec<String>>,
}

impl RawNode {
    /// Deserialize a node from a loosely structured record tree
    pub fn from_value(value: &Value) -> Result<Self, NormalizeError> {
        RawNode::deserialize(value).map_err(|e| NormalizeError::MalformedRecord {
            record: "physical server",
            reason: e.to_string(),
        })
    }
}

/// Physical placement of a node
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawLocation {
    pub location: Option<String>,
    pub room: Option<String>,
    pub rack: Option<String>,
    /// Sent as a number by some firmware levels and as text by others
    pub lowest_rack_unit: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawLed {
    pub name: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawProcessor {
    pub cores: Option<u64>,
}

/// Memory module; capacity is in gigabytes
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawMemoryModule {
    pub capacity: Option<u64>,
}

/// A RAID controller entry with its attached drives
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawStorage {
    pub disk_drives: Option<Vec<RawDiskDrive>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawDiskDrive {
    pub capacity: Option<u64>,
}

/// Firmware entry, shared by nodes and adapters
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawFirmware {
    pub role: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub build: Option<String>,
    pub version: Option<String>,
    pub date: Option<String>,
}

/// Add-in card or PCI device record
///
/// The appliance emits one of these per physical port of a multi-port adapter,
/// each repeating the adapter metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawAdapterRecord {
    pub name: Option<String>,
    pub product_name: Option<String>,
    pub manufacturer: Option<String>,
    #[serde(rename = "FRU")]
    pub fru: Option<String>,
    pub slot_number: Option<Value>,
    pub firmware: Option<Vec<RawFirmware>>,
    pub port_info: Option<RawPortInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawPortInfo {
    pub physical_ports: Option<Vec<RawPhysicalPort>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawPhysicalPort {
    pub physical_port_index: Option<Value>,
    pub logical_ports: Option<Vec<RawLogicalPort>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawLogicalPort {
    /// Hardware address without separators, e.g. `0018fe34a1b2`
    pub addresses: Option<String>,
}

/// Configuration pattern defined on the appliance
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawConfigPattern {
    pub id: Option<Value>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub user_defined: Option<bool>,
    pub in_use: Option<bool>,
}

impl RawConfigPattern {
    /// Deserialize a config pattern from a loosely structured record tree
    pub fn from_value(value: &Value) -> Result<Self, NormalizeError> {
        RawConfigPattern::deserialize(value).map_err(|e| NormalizeError::MalformedRecord {
            record: "config pattern",
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_tolerates_missing_and_null_keys() {
        let node = RawNode::from_value(&json!({
            "uuid": "ABC",
            "leds": null,
            "processors": [{"cores": 8}, {}],
        }))
        .unwrap();

        assert_eq!(node.uuid.as_deref(), Some("ABC"));
        assert!(node.leds.is_none());
        assert!(node.memory_modules.is_none());
        assert_eq!(node.processors.unwrap()[1].cores, None);
    }

    #[test]
    fn test_node_renamed_fields() {
        let node = RawNode::from_value(&json!({
            "FRU": "00MX123",
            "mgmtProcIPaddress": "10.0.0.5",
            "ipv6Addresses": ["fe80::1"],
            "cmmHealthState": "Normal",
            "serialNumber": "J300ABCD",
        }))
        .unwrap();

        assert_eq!(node.fru.as_deref(), Some("00MX123"));
        assert_eq!(node.mgmt_proc_ip_address.as_deref(), Some("10.0.0.5"));
        assert_eq!(node.ipv6_addresses, Some(vec!["fe80::1".to_string()]));
        assert_eq!(node.cmm_health_state.as_deref(), Some("Normal"));
        assert_eq!(node.serial_number.as_deref(), Some("J300ABCD"));
    }

    #[test]
    fn test_malformed_node_is_reported() {
        let err = RawNode::from_value(&json!({"powerStatus": "on"})).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::MalformedRecord {
                record: "physical server",
                ..
            }
        ));
    }

    #[test]
    fn test_adapter_record_with_numeric_slot() {
        let card: RawAdapterRecord = serde_json::from_value(json!({
            "name": "Broadcom NIC",
            "slotNumber": 3,
            "portInfo": {"physicalPorts": [{"physicalPortIndex": 1, "logicalPorts": [{"addresses": "aabbccddeeff"}]}]}
        }))
        .unwrap();

        assert_eq!(card.slot_number, Some(json!(3)));
        let ports = card.port_info.unwrap().physical_ports.unwrap();
        assert_eq!(ports[0].physical_port_index, Some(json!(1)));
    }
}
