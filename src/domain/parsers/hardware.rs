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

//! Scalar field extractors over a raw node
//!
//! Absent lists and null values fall back to the documented default instead
//! of failing. Only totals that overflow 64 bits are rejected.

use super::common::{items, scalar_to_string};
use super::dictionary::is_identify_led;
use crate::domain::{
    AssetDetails, ManagementDevice, ManagementNetwork, NormalizeError, RawLed, RawMemoryModule,
    RawNode, RawProcessor, RawStorage,
};

/// Megabytes per gigabyte of reported module capacity
const MB_PER_GB: u64 = 1024;

fn overflow(quantity: &str) -> NormalizeError {
    NormalizeError::MalformedRecord {
        record: "physical server",
        reason: format!("{quantity} overflows"),
    }
}

/// Sum of reported values, failing instead of wrapping on overflow
fn checked_total<I>(values: I, quantity: &str) -> Result<u64, NormalizeError>
where
    I: IntoIterator<Item = u64>,
{
    values
        .into_iter()
        .try_fold(0u64, |total, value| total.checked_add(value))
        .ok_or_else(|| overflow(quantity))
}

/// Total installed memory in megabytes
///
/// # Arguments
/// * `modules` - Memory modules with capacities in gigabytes
///
/// # Returns
/// * `Ok(total)` - Sum of capacities converted to megabytes, 0 when no modules are listed
/// * `Err(NormalizeError::MalformedRecord)` - The total does not fit in 64 bits
pub fn total_memory_mb(modules: &Option<Vec<RawMemoryModule>>) -> Result<u64, NormalizeError> {
    let capacities = items(modules)
        .iter()
        .map(|module| module.capacity.unwrap_or(0));

    checked_total(capacities, "memory capacity")?
        .checked_mul(MB_PER_GB)
        .ok_or_else(|| overflow("memory capacity"))
}

/// Sum of cores over all processors
pub fn total_cores(processors: &Option<Vec<RawProcessor>>) -> Result<u64, NormalizeError> {
    checked_total(
        items(processors)
            .iter()
            .map(|processor| processor.cores.unwrap_or(0)),
        "core count",
    )
}

/// Total capacity of all drives under all RAID controllers
///
/// # Returns
/// * `Ok(Some(total))` - at least one drive reported a positive capacity
/// * `Ok(None)` - nothing was reported; never `Some(0)`
/// * `Err(NormalizeError::MalformedRecord)` - the total does not fit in 64 bits
pub fn total_disk_capacity(
    raid_settings: &Option<Vec<RawStorage>>,
) -> Result<Option<u64>, NormalizeError> {
    let total = checked_total(
        items(raid_settings)
            .iter()
            .flat_map(|storage| items(&storage.disk_drives))
            .filter_map(|disk| disk.capacity),
        "disk capacity",
    )?;

    Ok((total > 0).then_some(total))
}

/// State of the first identify LED, if any
pub fn location_led_state(leds: &Option<Vec<RawLed>>) -> Option<String> {
    items(leds)
        .iter()
        .find(|led| led.name.as_deref().is_some_and(is_identify_led))
        .and_then(|led| led.state.clone())
}

/// Management network descriptor of a node
pub fn management_network(node: &RawNode) -> ManagementNetwork {
    ManagementNetwork {
        ipaddress: node.mgmt_proc_ip_address.clone(),
        ipv6address: node
            .ipv6_addresses
            .as_ref()
            .map(|addresses| addresses.join(", ")),
    }
}

/// Management controller device of a node
pub fn management_device(node: &RawNode) -> ManagementDevice {
    ManagementDevice {
        network: management_network(node),
        address: node.mac_address.clone(),
    }
}

/// Location and ownership details of a node
pub fn asset_details(node: &RawNode) -> AssetDetails {
    let location = node.location.clone().unwrap_or_default();

    AssetDetails {
        contact: node.contact.clone(),
        description: node.description.clone(),
        location: location.location,
        room: location.room,
        rack_name: location.rack,
        lowest_rack_unit: scalar_to_string(&location.lowest_rack_unit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RawDiskDrive, RawLocation};
    use serde_json::json;

    fn modules(capacities: &[u64]) -> Option<Vec<RawMemoryModule>> {
        Some(
            capacities
                .iter()
                .map(|c| RawMemoryModule { capacity: Some(*c) })
                .collect(),
        )
    }

    fn led(name: &str, state: &str) -> RawLed {
        RawLed {
            name: Some(name.to_string()),
            state: Some(state.to_string()),
        }
    }

    #[test]
    fn test_total_memory_mb() {
        assert_eq!(total_memory_mb(&modules(&[16, 32])).unwrap(), 49152);
        assert_eq!(total_memory_mb(&modules(&[])).unwrap(), 0);
        assert_eq!(total_memory_mb(&None).unwrap(), 0);
    }

    #[test]
    fn test_total_memory_skips_null_capacity() {
        let mut list = modules(&[8]).unwrap();
        list.push(RawMemoryModule { capacity: None });
        assert_eq!(total_memory_mb(&Some(list)).unwrap(), 8192);
    }

    #[test]
    fn test_total_cores() {
        let processors = Some(vec![
            RawProcessor { cores: Some(12) },
            RawProcessor { cores: Some(12) },
            RawProcessor { cores: None },
        ]);
        assert_eq!(total_cores(&processors).unwrap(), 24);
        assert_eq!(total_cores(&None).unwrap(), 0);
        assert_eq!(total_cores(&Some(vec![])).unwrap(), 0);
    }

    #[test]
    fn test_total_disk_capacity() {
        let raid = Some(vec![
            RawStorage {
                disk_drives: Some(vec![
                    RawDiskDrive {
                        capacity: Some(300),
                    },
                    RawDiskDrive { capacity: None },
                ]),
            },
            RawStorage { disk_drives: None },
            RawStorage {
                disk_drives: Some(vec![RawDiskDrive {
                    capacity: Some(600),
                }]),
            },
        ]);
        assert_eq!(total_disk_capacity(&raid).unwrap(), Some(900));
    }

    #[test]
    fn test_total_disk_capacity_is_absent_rather_than_zero() {
        assert_eq!(total_disk_capacity(&None).unwrap(), None);
        assert_eq!(total_disk_capacity(&Some(vec![])).unwrap(), None);

        let zeros = Some(vec![RawStorage {
            disk_drives: Some(vec![RawDiskDrive { capacity: Some(0) }]),
        }]);
        assert_eq!(total_disk_capacity(&zeros).unwrap(), None);
    }

    #[test]
    fn test_totals_reject_overflow() {
        let err = total_memory_mb(&modules(&[u64::MAX / 512])).unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedRecord { .. }));
        assert!(err.to_string().contains("memory capacity overflows"));

        assert!(total_memory_mb(&modules(&[u64::MAX, 1])).is_err());

        let processors = Some(vec![
            RawProcessor { cores: Some(u64::MAX) },
            RawProcessor { cores: Some(1) },
        ]);
        assert!(total_cores(&processors).is_err());

        let raid = Some(vec![RawStorage {
            disk_drives: Some(vec![
                RawDiskDrive {
                    capacity: Some(u64::MAX),
                },
                RawDiskDrive { capacity: Some(1) },
            ]),
        }]);
        assert!(total_disk_capacity(&raid).is_err());
    }

    #[test]
    fn test_location_led_state_takes_first_identify_led() {
        let leds = Some(vec![
            led("Fault", "Off"),
            led("Identify", "Blinking"),
            led("Identification", "On"),
        ]);
        assert_eq!(location_led_state(&leds).as_deref(), Some("Blinking"));

        let leds = Some(vec![led("Identification", "On")]);
        assert_eq!(location_led_state(&leds).as_deref(), Some("On"));
    }

    #[test]
    fn test_location_led_state_absent() {
        assert_eq!(location_led_state(&None), None);
        assert_eq!(location_led_state(&Some(vec![led("Fault", "Off")])), None);
    }

    #[test]
    fn test_management_network() {
        let node = RawNode {
            mgmt_proc_ip_address: Some("10.243.6.1".to_string()),
            ipv6_addresses: Some(vec!["fe80::1".to_string(), "fd00::2".to_string()]),
            mac_address: Some("40:F2:E9:AF:45:A1".to_string()),
            ..Default::default()
        };

        let device = management_device(&node);
        assert_eq!(device.network.ipaddress.as_deref(), Some("10.243.6.1"));
        assert_eq!(device.network.ipv6address.as_deref(), Some("fe80::1, fd00::2"));
        assert_eq!(device.address.as_deref(), Some("40:F2:E9:AF:45:A1"));

        let network = management_network(&RawNode::default());
        assert!(network.ipaddress.is_none());
        assert!(network.ipv6address.is_none());
    }

    #[test]
    fn test_asset_details() {
        let node = RawNode {
            contact: Some("ops".to_string()),
            location: Some(RawLocation {
                location: Some("DC1".to_string()),
                room: Some("R2".to_string()),
                rack: Some("A07".to_string()),
                lowest_rack_unit: Some(json!(12)),
            }),
            ..Default::default()
        };

        let details = asset_details(&node);
        assert_eq!(details.contact.as_deref(), Some("ops"));
        assert_eq!(details.location.as_deref(), Some("DC1"));
        assert_eq!(details.room.as_deref(), Some("R2"));
        assert_eq!(details.rack_name.as_deref(), Some("A07"));
        assert_eq!(details.lowest_rack_unit, "12");

        let details = asset_details(&RawNode::default());
        assert!(details.location.is_none());
        assert_eq!(details.lowest_rack_unit, "");
    }
}
