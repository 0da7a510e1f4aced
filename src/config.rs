//! Guidance configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::GuidanceError;
use crate::localization::Localizer;
use crate::street::NEXT_STREET_LOOKAHEAD_M;
use crate::units::UnitSystem;

/// Next maneuvers further away than this are not previewed.
pub const NEXT_MANEUVER_MAX_DISTANCE_M: u32 = 1000;

/// Settings for a guidance session. Every field has a default, so an
/// empty JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidanceConfig {
    /// Window for the next street lookahead, in meters.
    pub next_street_lookahead_m: u32,
    /// Maximum distance between the current and next maneuver for the
    /// next maneuver preview, in meters.
    pub next_maneuver_max_distance_m: u32,
    pub unit_system: UnitSystem,
    /// Localized strings overriding the English defaults.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub strings: HashMap<String, String>,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            next_street_lookahead_m: NEXT_STREET_LOOKAHEAD_M,
            next_maneuver_max_distance_m: NEXT_MANEUVER_MAX_DISTANCE_M,
            unit_system: UnitSystem::default(),
            strings: HashMap::new(),
        }
    }
}

impl GuidanceConfig {
    /// Decode a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, GuidanceError> {
        serde_json::from_str(json).map_err(GuidanceError::decode("guidance config"))
    }

    /// The English string table with this configuration's overrides.
    pub fn localizer(&self) -> Localizer {
        Localizer::english().with_overrides(self.strings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localization::keys;

    #[test]
    fn empty_json_is_default() {
        let config = GuidanceConfig::from_json("{}").unwrap();
        assert_eq!(config, GuidanceConfig::default());
        assert_eq!(config.next_street_lookahead_m, 750);
        assert_eq!(config.next_maneuver_max_distance_m, 1000);
        assert_eq!(config.unit_system, UnitSystem::Metric);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = GuidanceConfig::from_json(
            r#"{ "unit_system": "imperial_uk", "strings": { "maneuver_exit": "Sortie %@" } }"#,
        )
        .unwrap();

        assert_eq!(config.unit_system, UnitSystem::ImperialUk);
        assert_eq!(config.next_street_lookahead_m, 750);
        assert_eq!(config.localizer().format(keys::EXIT, &["4"]), "Sortie 4");
    }

    #[test]
    fn invalid_unit_system_is_rejected() {
        assert!(GuidanceConfig::from_json(r#"{ "unit_system": "furlongs" }"#).is_err());
    }
}
