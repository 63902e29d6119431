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

//! Network adapter normalization
//!
//! The appliance reports a multi-port adapter as one record per port, each
//! repeating the adapter metadata. [`parse_network_adapters`] classifies the
//! records, parses each one on its own, and folds the candidates into one
//! adapter per physical card with an ordered, duplicate free port list.

use super::common::{format_firmwares, format_mac_address, items, scalar_to_string};
use crate::domain::{NetworkAdapter, Port, PortType, RawAdapterRecord, RawNode, RawPhysicalPort};

/// Kind of device a raw adapter record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterClass {
    Ethernet,
    Other,
}

/// Classify an adapter record by its name
///
/// A record is ethernet when its lower-cased name contains `nic` or `ethernet`.
pub fn classify_adapter(record: &RawAdapterRecord) -> AdapterClass {
    match record.name.as_deref().map(str::to_lowercase) {
        Some(name) if name.contains("nic") || name.contains("ethernet") => AdapterClass::Ethernet,
        _ => AdapterClass::Other,
    }
}

/// Adapter records of a node, PCI devices first, then add-in cards
pub fn adapter_records(node: &RawNode) -> impl Iterator<Item = &RawAdapterRecord> {
    items(&node.pci_devices)
        .iter()
        .chain(items(&node.addin_cards).iter())
}

/// Build a port from a physical port entry
///
/// Only the first logical port carries the address that is kept.
pub fn parse_port(physical_port: &RawPhysicalPort) -> Port {
    let address = items(&physical_port.logical_ports)
        .first()
        .and_then(|logical| logical.addresses.as_deref())
        .map(format_mac_address);

    Port {
        device_type: PortType::PhysicalPort,
        device_name: format!(
            "Physical Port {}",
            scalar_to_string(&physical_port.physical_port_index)
        ),
        address,
    }
}

/// Parse a single ethernet record into a candidate adapter
pub fn parse_adapter(record: &RawAdapterRecord) -> NetworkAdapter {
    let physical_ports = record
        .port_info
        .as_ref()
        .map(|info| items(&info.physical_ports))
        .unwrap_or(&[]);

    let child_devices = physical_ports
        .iter()
        .map(parse_port)
        .fold(Vec::new(), append_missing_port);

    NetworkAdapter {
        device_name: record.product_name.clone(),
        firmwares: format_firmwares(&record.firmware),
        manufacturer: record.manufacturer.clone(),
        field_replaceable_unit: record.fru.clone(),
        location: format!("Bay {}", scalar_to_string(&record.slot_number)),
        child_devices,
    }
}

/// Append a port unless a port with the same name is already present
fn append_missing_port(mut ports: Vec<Port>, port: Port) -> Vec<Port> {
    if !ports.iter().any(|existing| existing.device_name == port.device_name) {
        ports.push(port);
    }
    ports
}

/// Fold one candidate into the accepted adapters
///
/// The candidate's new ports are appended to every accepted adapter that
/// matches it by name or bay. The candidate itself is only accepted when
/// nothing matched.
pub fn merge_adapter(
    accepted: Vec<NetworkAdapter>,
    candidate: NetworkAdapter,
) -> Vec<NetworkAdapter> {
    let mut matched = false;

    let mut merged: Vec<NetworkAdapter> = accepted
        .into_iter()
        .map(|mut adapter| {
            if adapter.same_device(&candidate) {
                matched = true;
                adapter.child_devices = candidate
                    .child_devices
                    .iter()
                    .cloned()
                    .fold(adapter.child_devices, append_missing_port);
            }
            adapter
        })
        .collect();

    if !matched {
        merged.push(candidate);
    }
    merged
}

/// Collapse candidates into one adapter per physical card
///
/// Adapter order is the order of first appearance; port order within an
/// adapter is first-seen order across all candidates.
pub fn deduplicate_adapters<I>(candidates: I) -> Vec<NetworkAdapter>
where
    I: IntoIterator<Item = NetworkAdapter>,
{
    candidates.into_iter().fold(Vec::new(), merge_adapter)
}

/// Normalize the network adapters of a node
pub fn parse_network_adapters(node: &RawNode) -> Vec<NetworkAdapter> {
    deduplicate_adapters(
        adapter_records(node)
            .filter(|record| classify_adapter(record) == AdapterClass::Ethernet)
            .map(parse_adapter),
    )
}
