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

//! Registry of parsing rulesets keyed by appliance API version
//!
//! A new API version is supported by registering another [`Ruleset`] in
//! [`RULESETS`]; lookups never fall back to a default entry.

use crate::domain::parsers::{parse_config_pattern, parse_physical_server};
use crate::domain::{
    CanonicalConfigPattern, CanonicalServer, NormalizeError, RawConfigPattern, RawNode,
};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Field mapping rules for one API version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ruleset {
    /// API version this ruleset applies to
    pub version: &'static str,
    /// Vendor tag stamped on canonical records
    pub vendor: &'static str,
}

impl Ruleset {
    /// Normalize a raw node into `(external id, canonical server)`
    pub fn normalize_server(
        &self,
        node: &RawNode,
    ) -> Result<(String, CanonicalServer), NormalizeError> {
        parse_physical_server(node, self.vendor)
    }

    /// Normalize a raw configuration pattern into `(external id, canonical pattern)`
    pub fn normalize_config_pattern(
        &self,
        pattern: &RawConfigPattern,
    ) -> Result<(String, CanonicalConfigPattern), NormalizeError> {
        parse_config_pattern(pattern)
    }
}

pub const RULESET_1_3: Ruleset = Ruleset {
    version: "1.3",
    vendor: "lenovo",
};

lazy_static! {
    pub static ref RULESETS: HashMap<&'static str, Ruleset> = {
        let mut rulesets = HashMap::new();
        rulesets.insert(RULESET_1_3.version, RULESET_1_3);
        rulesets
    };
}

/// Registered API versions, sorted
pub fn supported_versions() -> Vec<&'static str> {
    let mut versions: Vec<&'static str> = RULESETS.keys().copied().collect();
    versions.sort_unstable();
    versions
}

/// Select the ruleset for an API version
///
/// # Returns
/// * `Ok(&Ruleset)` - ruleset registered for exactly this version
/// * `Err(NormalizeError::UnsupportedVersion)` - no such ruleset
pub fn get_ruleset(version: &str) -> Result<&'static Ruleset, NormalizeError> {
    RULESETS
        .get(version)
        .ok_or_else(|| NormalizeError::UnsupportedVersion {
            version: version.to_string(),
            supported: supported_versions()
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_ruleset_1_3() {
        let ruleset = get_ruleset("1.3").unwrap();
        assert_eq!(ruleset.version, "1.3");
        assert_eq!(ruleset.vendor, "lenovo");
    }

    #[test]
    fn test_unknown_version_fails_closed() {
        for version in ["2.0", "", "1.3.0", " 1.3"] {
            let err = get_ruleset(version).unwrap_err();
            assert_eq!(
                err,
                NormalizeError::UnsupportedVersion {
                    version: version.to_string(),
                    supported: vec!["1.3".to_string()],
                }
            );
        }
    }

    #[test]
    fn test_supported_versions() {
        assert_eq!(supported_versions(), vec!["1.3"]);
    }

    #[test]
    fn test_ruleset_normalizes_server() {
        let node = RawNode {
            uuid: Some("A1".to_string()),
            power_status: Some(5),
            ..Default::default()
        };
        let (id, server) = get_ruleset("1.3").unwrap().normalize_server(&node).unwrap();
        assert_eq!(id, "A1");
        assert_eq!(server.vendor, "lenovo");
        assert_eq!(server.power_state.as_str(), "off");
    }
}
