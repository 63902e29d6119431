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

//! Assembly of canonical server and config pattern records

use super::common::{format_firmwares, scalar_to_string};
use super::dictionary::{health_state, power_state};
use super::hardware::{
    asset_details, location_led_state, management_device, total_cores, total_disk_capacity,
    total_memory_mb,
};
use super::network::parse_network_adapters;
use crate::domain::{
    CanonicalConfigPattern, CanonicalServer, GuestDevice, Hardware, HealthState,
    NormalizeError, RawConfigPattern, RawNode,
};
use log::warn;

/// Build the hardware block of a node
///
/// Guest devices are the deduplicated network adapters followed by the
/// management controller. Fails when a reported total overflows.
pub fn parse_hardware(node: &RawNode) -> Result<Hardware, NormalizeError> {
    let mut guest_devices: Vec<GuestDevice> = parse_network_adapters(node)
        .into_iter()
        .map(GuestDevice::NetworkAdapter)
        .collect();
    guest_devices.push(GuestDevice::Management(management_device(node)));

    Ok(Hardware {
        memory_mb: total_memory_mb(&node.memory_modules)?,
        cpu_total_cores: total_cores(&node.processors)?,
        disk_capacity: total_disk_capacity(&node.raid_settings)?,
        firmwares: format_firmwares(&node.firmware),
        guest_devices,
    })
}

/// Canonical health of a node
///
/// Codes missing from the table are logged and reported as `Unknown`.
fn node_health_state(node: &RawNode) -> HealthState {
    let code = node.cmm_health_state.as_deref();
    health_state(code).unwrap_or_else(|| {
        warn!(
            "Unrecognized health state '{}' on node {}, reporting Unknown",
            code.unwrap_or_default(),
            node.uuid.as_deref().unwrap_or("<no uuid>")
        );
        HealthState::Unknown
    })
}

/// Normalize a raw node into a canonical server record
///
/// # Arguments
/// * `node` - Raw node record
/// * `vendor` - Vendor tag stamped on the record
///
/// # Returns
/// * `Ok((uuid, server))` - External id and canonical record
/// * `Err(NormalizeError)` - The node has no uuid or a hardware total overflows
pub fn parse_physical_server(
    node: &RawNode,
    vendor: &str,
) -> Result<(String, CanonicalServer), NormalizeError> {
    let uuid = node
        .uuid
        .clone()
        .filter(|uuid| !uuid.is_empty())
        .ok_or(NormalizeError::MissingIdentifier("physical server"))?;

    let server = CanonicalServer {
        name: node.name.clone(),
        ems_ref: uuid.clone(),
        uid_ems: uuid.clone(),
        hostname: node.hostname.clone(),
        product_name: node.product_name.clone(),
        manufacturer: node.manufacturer.clone(),
        machine_type: node.machine_type.clone(),
        model: node.model.clone(),
        serial_number: node.serial_number.clone(),
        field_replaceable_unit: node.fru.clone(),
        vendor: vendor.to_string(),
        power_state: power_state(node.power_status),
        health_state: node_health_state(node),
        host_relationship_key: node.serial_number.clone(),
        host: None,
        location_led_state: location_led_state(&node.leds),
        asset_details: asset_details(node),
        hardware: parse_hardware(node)?,
    };

    Ok((uuid, server))
}

/// Normalize a raw configuration pattern
pub fn parse_config_pattern(
    pattern: &RawConfigPattern,
) -> Result<(String, CanonicalConfigPattern), NormalizeError> {
    let id = scalar_to_string(&pattern.id);
    if id.is_empty() {
        return Err(NormalizeError::MissingIdentifier("config pattern"));
    }

    let canonical = CanonicalConfigPattern {
        manager_ref: id.clone(),
        name: pattern.name.clone(),
        description: pattern.description.clone(),
        user_defined: pattern.user_defined.unwrap_or(false),
        in_use: pattern.in_use.unwrap_or(false),
    };

    Ok((id, canonical))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PowerState, RawFirmware, RawLed};
    use serde_json::json;

    fn sample_node() -> RawNode {
        RawNode::from_value(&json!({
            "uuid": "BD8F5A1C2A8F11E7A7E2000E1E9C9F00",
            "name": "node-07",
            "hostname": "node-07.lab",
            "serialNumber": "J30002HG",
            "FRU": "00FL372",
            "productName": "ThinkSystem SR650",
            "manufacturer": "Lenovo",
            "machineType": "7X06",
            "model": "CTO1WW",
            "powerStatus": 8,
            "cmmHealthState": "Normal",
            "location": {"location": "DC1", "room": "R2", "rack": "A07", "lowestRackUnit": 12},
            "leds": [{"name": "Fault", "state": "Off"}, {"name": "Identify", "state": "On"}],
            "processors": [{"cores": 14}, {"cores": 14}],
            "memoryModules": [{"capacity": 16}, {"capacity": 32}],
            "raidSettings": [{"diskDrives": [{"capacity": 1200}, {"capacity": null}]}],
            "firmware": [{"role": "Primary", "name": "UEFI", "status": "Active", "build": "TEE113T", "version": "1.30", "date": "2017-09-20"}],
            "pciDevices": [
                {"name": "Intel Ethernet", "productName": "X722", "slotNumber": 0,
                 "portInfo": {"physicalPorts": [{"physicalPortIndex": 1, "logicalPorts": [{"addresses": "7ed30a8f3a01"}]}]}}
            ],
            "addinCards": [
                {"name": "Intel Ethernet", "productName": "X722", "slotNumber": 0,
                 "portInfo": {"physicalPorts": [{"physicalPortIndex": 2, "logicalPorts": [{"addresses": "7ed30a8f3a02"}]}]}},
                {"name": "ServeRAID M5210", "productName": "M5210", "slotNumber": 4}
            ],
            "macAddress": "7E:D3:0A:8F:3A:00",
            "mgmtProcIPaddress": "10.243.9.7",
            "ipv6Addresses": ["fe80::7cd3:aff:fe8f:3a00"]
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_physical_server() {
        let (id, server) = parse_physical_server(&sample_node(), "lenovo").unwrap();

        assert_eq!(id, "BD8F5A1C2A8F11E7A7E2000E1E9C9F00");
        assert_eq!(server.ems_ref, id);
        assert_eq!(server.uid_ems, id);
        assert_eq!(server.name.as_deref(), Some("node-07"));
        assert_eq!(server.vendor, "lenovo");
        assert_eq!(server.power_state, PowerState::On);
        assert_eq!(server.health_state, HealthState::Valid);
        assert_eq!(server.host_relationship_key.as_deref(), Some("J30002HG"));
        assert!(server.host.is_none());
        assert_eq!(server.location_led_state.as_deref(), Some("On"));
        assert_eq!(server.field_replaceable_unit.as_deref(), Some("00FL372"));
        assert_eq!(server.asset_details.rack_name.as_deref(), Some("A07"));
        assert_eq!(server.asset_details.lowest_rack_unit, "12");
    }

    #[test]
    fn test_parse_hardware() {
        let hardware = parse_hardware(&sample_node()).unwrap();

        assert_eq!(hardware.memory_mb, 49152);
        assert_eq!(hardware.cpu_total_cores, 28);
        assert_eq!(hardware.disk_capacity, Some(1200));
        assert_eq!(hardware.firmwares.len(), 1);
        assert_eq!(hardware.firmwares[0].name, "Primary UEFI-Active");

        assert_eq!(hardware.guest_devices.len(), 2);
        match &hardware.guest_devices[0] {
            GuestDevice::NetworkAdapter(adapter) => {
                assert_eq!(adapter.device_name.as_deref(), Some("X722"));
                assert_eq!(adapter.location, "Bay 0");
                assert_eq!(adapter.child_devices.len(), 2);
                assert_eq!(
                    adapter.child_devices[1].address.as_deref(),
                    Some("7e:d3:0a:8f:3a:02")
                );
            }
            other => panic!("expected network adapter, got {other:?}"),
        }
        match &hardware.guest_devices[1] {
            GuestDevice::Management(device) => {
                assert_eq!(device.address.as_deref(), Some("7E:D3:0A:8F:3A:00"));
                assert_eq!(device.network.ipaddress.as_deref(), Some("10.243.9.7"));
            }
            other => panic!("expected management device, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_node_uses_defaults() {
        let node = RawNode {
            uuid: Some("X".to_string()),
            ..Default::default()
        };
        let (_, server) = parse_physical_server(&node, "lenovo").unwrap();

        assert_eq!(server.power_state, PowerState::Unknown);
        assert_eq!(server.health_state, HealthState::Unknown);
        assert!(server.host_relationship_key.is_none());
        assert!(server.location_led_state.is_none());
        assert_eq!(server.hardware.memory_mb, 0);
        assert_eq!(server.hardware.cpu_total_cores, 0);
        assert_eq!(server.hardware.disk_capacity, None);
        assert!(server.hardware.firmwares.is_empty());
        assert_eq!(server.hardware.guest_devices.len(), 1);
        assert!(matches!(
            server.hardware.guest_devices[0],
            GuestDevice::Management(_)
        ));
    }

    #[test]
    fn test_unrecognized_health_state_maps_to_unknown() {
        let node = RawNode {
            uuid: Some("X".to_string()),
            cmm_health_state: Some("Degraded".to_string()),
            ..Default::default()
        };
        let (_, server) = parse_physical_server(&node, "lenovo").unwrap();
        assert_eq!(server.health_state, HealthState::Unknown);
    }

    #[test]
    fn test_node_without_uuid_fails() {
        let err = parse_physical_server(&RawNode::default(), "lenovo").unwrap_err();
        assert_eq!(err, NormalizeError::MissingIdentifier("physical server"));

        let node = RawNode {
            uuid: Some(String::new()),
            ..Default::default()
        };
        assert!(parse_physical_server(&node, "lenovo").is_err());
    }

    #[test]
    fn test_overflowing_memory_fails_only_that_node() {
        let node = RawNode::from_value(&json!({
            "uuid": "X",
            "memoryModules": [{"capacity": u64::MAX / 512}]
        }))
        .unwrap();

        let err = parse_physical_server(&node, "lenovo").unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::MalformedRecord {
                record: "physical server",
                ..
            }
        ));
        assert!(parse_physical_server(&sample_node(), "lenovo").is_ok());
    }

    #[test]
    fn test_normalization_is_deterministic() {
        let node = sample_node();
        assert_eq!(
            parse_physical_server(&node, "lenovo").unwrap(),
            parse_physical_server(&node, "lenovo").unwrap()
        );
    }

    #[test]
    fn test_firmware_name_never_empty() {
        let node = RawNode {
            uuid: Some("X".to_string()),
            firmware: Some(vec![RawFirmware::default()]),
            leds: Some(vec![RawLed::default()]),
            ..Default::default()
        };
        let (_, server) = parse_physical_server(&node, "lenovo").unwrap();
        assert!(!server.hardware.firmwares[0].name.is_empty());
    }

    #[test]
    fn test_parse_config_pattern() {
        let pattern = RawConfigPattern::from_value(&json!({
            "id": 54,
            "name": "SR650 base",
            "description": "Default settings",
            "userDefined": true,
            "inUse": false
        }))
        .unwrap();

        let (id, canonical) = parse_config_pattern(&pattern).unwrap();
        assert_eq!(id, "54");
        assert_eq!(canonical.manager_ref, "54");
        assert_eq!(canonical.name.as_deref(), Some("SR650 base"));
        assert!(canonical.user_defined);
        assert!(!canonical.in_use);
    }

    #[test]
    fn test_config_pattern_without_id_fails() {
        let err = parse_config_pattern(&RawConfigPattern::default()).unwrap_err();
        assert_eq!(err, NormalizeError::MissingIdentifier("config pattern"));
    }
}
