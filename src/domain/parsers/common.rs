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

//! Common parsing utilities and helper functions

use crate::domain::{Firmware, RawFirmware};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    pub static ref MAC_PAIR_RE: Regex = Regex::new(r"\w{2}").unwrap();
}

/// Borrow an optional list as a slice, treating absence as empty
///
/// Every list-consuming extractor goes through this so that a missing key,
/// an explicit `null` and an empty list behave the same.
pub fn items<T>(list: &Option<Vec<T>>) -> &[T] {
    list.as_deref().unwrap_or(&[])
}

/// Render a scalar that the appliance sends either as text or as a number
///
/// # Returns
/// * The text itself, the number's decimal form, or an empty string for
///   `null`/absent values
pub fn scalar_to_string(value: &Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Format a hardware address as colon separated pairs
///
/// # Arguments
/// * `raw` - Address as reported, e.g. `"0018fe34a1b2"`
///
/// # Returns
/// * Formatted address, e.g. `"00:18:fe:34:a1:b2"`
pub fn format_mac_address(raw: &str) -> String {
    MAC_PAIR_RE
        .find_iter(raw)
        .map(|pair| pair.as_str())
        .collect::<Vec<_>>()
        .join(":")
}

/// Convert a raw firmware entry to its canonical form
///
/// Missing parts render as empty text inside the name.
pub fn format_firmware(firmware: &RawFirmware) -> Firmware {
    let part = |value: &Option<String>| value.clone().unwrap_or_default();

    Firmware {
        name: format!(
            "{} {}-{}",
            part(&firmware.role),
            part(&firmware.name),
            part(&firmware.status)
        ),
        build: firmware.build.clone(),
        version: firmware.version.clone(),
        release_date: firmware.date.clone(),
    }
}

/// Convert an optional firmware list
pub fn format_firmwares(firmwares: &Option<Vec<RawFirmware>>) -> Vec<Firmware> {
    items(firmwares).iter().map(format_firmware).collect()
}
