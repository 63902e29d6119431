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

//! Static vendor code tables

use crate::domain::{HealthState, PowerState};

/// Power codes reported by the appliance
pub const POWER_STATE_MAP: &[(i64, PowerState)] = &[
    (8, PowerState::On),
    (5, PowerState::Off),
    (18, PowerState::Standby),
    (0, PowerState::Unknown),
];

/// Health codes, lower-case
pub const HEALTH_STATE_MAP: &[(&str, HealthState)] = &[
    ("normal", HealthState::Valid),
    ("non-critical", HealthState::Valid),
    ("warning", HealthState::Warning),
    ("critical", HealthState::Critical),
    ("unknown", HealthState::None),
    ("minor-failure", HealthState::Critical),
    ("major-failure", HealthState::Critical),
    ("non-recoverable", HealthState::Critical),
    ("fatal", HealthState::Critical),
];

/// LED names that denote the identify (location) LED
pub const LED_IDENTIFY_NAMES: &[&str] = &["Identification", "Identify"];

/// Map a power code to the canonical power state
///
/// Unset and unrecognized codes map to `Unknown`.
pub fn power_state(code: Option<i64>) -> PowerState {
    code.and_then(|code| {
        POWER_STATE_MAP
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, state)| *state)
    })
    .unwrap_or(PowerState::Unknown)
}

/// Map a health code to the canonical health state
///
/// # Returns
/// * `Some(HealthState::Unknown)` - no code was reported
/// * `Some(state)` - the code matched case-insensitively
/// * `None` - the code is not in the table
pub fn health_state(code: Option<&str>) -> Option<HealthState> {
    let Some(code) = code else {
        return Some(HealthState::Unknown);
    };
    let code = code.to_lowercase();
    HEALTH_STATE_MAP
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, state)| *state)
}

/// Whether an LED name denotes the identify LED
pub fn is_identify_led(name: &str) -> bool {
    LED_IDENTIFY_NAMES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_state() {
        assert_eq!(power_state(Some(8)), PowerState::On);
        assert_eq!(power_state(Some(5)), PowerState::Off);
        assert_eq!(power_state(Some(18)), PowerState::Standby);
        assert_eq!(power_state(Some(0)), PowerState::Unknown);
        assert_eq!(power_state(Some(42)), PowerState::Unknown);
        assert_eq!(power_state(None), PowerState::Unknown);
    }

    #[test]
    fn test_health_state_is_case_insensitive() {
        for code in ["Critical", "critical", "CRITICAL"] {
            assert_eq!(health_state(Some(code)), Some(HealthState::Critical));
        }
        assert_eq!(health_state(Some("Normal")), Some(HealthState::Valid));
        assert_eq!(health_state(Some("Non-Critical")), Some(HealthState::Valid));
        assert_eq!(health_state(Some("warning")), Some(HealthState::Warning));
        assert_eq!(health_state(Some("Fatal")), Some(HealthState::Critical));
        assert_eq!(health_state(Some("unknown")), Some(HealthState::None));
    }

    #[test]
    fn test_health_state_absent_and_unrecognized() {
        assert_eq!(health_state(None), Some(HealthState::Unknown));
        assert_eq!(health_state(Some("degraded")), None);
    }

    #[test]
    fn test_identify_led_aliases() {
        assert!(is_identify_led("Identify"));
        assert!(is_identify_led("Identification"));
        assert!(!is_identify_led("Fault"));
        assert!(!is_identify_led("identify"));
    }
}
