//! Maneuver data model.
//!
//! Mirrors what the routing engine hands us for each maneuver of a
//! calculated route. Everything here is plain data that can cross the
//! JNI boundary as JSON or be built directly by a non-Android frontend.
//! The resolvers never mutate a maneuver.

use serde::{Deserialize, Serialize};

use crate::error::GuidanceError;

/// A geographic coordinate with optional elevation.
///
/// Compared with exact floating point equality: two maneuvers sit on the
/// same point only if the engine reported bit-identical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ele: Option<f64>,
}

/// What the traveler does at a maneuver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManeuverAction {
    #[default]
    Undefined,
    None,
    End,
    Stopover,
    Junction,
    Roundabout,
    UTurn,
    EnterHighwayFromRight,
    EnterHighwayFromLeft,
    EnterHighway,
    LeaveHighway,
    ChangeHighway,
    ContinueHighway,
    Ferry,
    PassJunction,
    HeadTo,
    PassStation,
    ChangeLine,
}

impl ManeuverAction {
    /// Junctions and roundabouts put the traveler onto a different road.
    pub fn is_changing_road(self) -> bool {
        matches!(self, Self::Junction | Self::Roundabout)
    }
}

/// Turn direction and sharpness at a maneuver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManeuverTurn {
    #[default]
    Undefined,
    NoTurn,
    KeepMiddle,
    KeepRight,
    LightRight,
    QuiteRight,
    HeavyRight,
    KeepLeft,
    LightLeft,
    QuiteLeft,
    HeavyLeft,
    Return,
    Roundabout1,
    Roundabout2,
    Roundabout3,
    Roundabout4,
    Roundabout5,
    Roundabout6,
    Roundabout7,
    Roundabout8,
    Roundabout9,
    Roundabout10,
    Roundabout11,
    Roundabout12,
}

impl ManeuverTurn {
    /// True for the three lane-keeping turns.
    pub fn is_keep(self) -> bool {
        matches!(self, Self::KeepLeft | Self::KeepMiddle | Self::KeepRight)
    }

    /// Roundabout exit number (1-based) for roundabout turns.
    pub fn roundabout_exit(self) -> Option<u8> {
        let exit = match self {
            Self::Roundabout1 => 1,
            Self::Roundabout2 => 2,
            Self::Roundabout3 => 3,
            Self::Roundabout4 => 4,
            Self::Roundabout5 => 5,
            Self::Roundabout6 => 6,
            Self::Roundabout7 => 7,
            Self::Roundabout8 => 8,
            Self::Roundabout9 => 9,
            Self::Roundabout10 => 10,
            Self::Roundabout11 => 11,
            Self::Roundabout12 => 12,
            _ => return None,
        };
        Some(exit)
    }
}

/// Engine-assigned pictogram for a maneuver.
///
/// The discriminants are the engine's stable icon codes and end up in the
/// icon file names, so they must not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ManeuverIcon {
    #[default]
    Undefined = 0,
    GoStraight = 1,
    UTurnRight = 2,
    UTurnLeft = 3,
    KeepRight = 4,
    LightRight = 5,
    QuiteRight = 6,
    HeavyRight = 7,
    KeepMiddle = 8,
    KeepLeft = 9,
    LightLeft = 10,
    QuiteLeft = 11,
    HeavyLeft = 12,
    EnterHighwayRightLane = 13,
    EnterHighwayLeftLane = 14,
    LeaveHighwayRightLane = 15,
    LeaveHighwayLeftLane = 16,
    HighwayKeepRight = 17,
    HighwayKeepLeft = 18,
    Roundabout1 = 19,
    Roundabout2 = 20,
    Roundabout3 = 21,
    Roundabout4 = 22,
    Roundabout5 = 23,
    Roundabout6 = 24,
    Roundabout7 = 25,
    Roundabout8 = 26,
    Roundabout9 = 27,
    Roundabout10 = 28,
    Roundabout11 = 29,
    Roundabout12 = 30,
    Roundabout1Lh = 31,
    Roundabout2Lh = 32,
    Roundabout3Lh = 33,
    Roundabout4Lh = 34,
    Roundabout5Lh = 35,
    Roundabout6Lh = 36,
    Roundabout7Lh = 37,
    Roundabout8Lh = 38,
    Roundabout9Lh = 39,
    Roundabout10Lh = 40,
    Roundabout11Lh = 41,
    Roundabout12Lh = 42,
    Start = 43,
    End = 44,
    Ferry = 45,
    PassStation = 46,
    HeadTo = 47,
    ChangeLine = 48,
}

impl ManeuverIcon {
    /// The engine's numeric icon code.
    pub fn code(self) -> u8 {
        self as u8
    }
}

bitflags::bitflags! {
    /// Attributes of the road element a maneuver starts on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RoadAttributes: u32 {
        const TOLLROAD = 1 << 0;
        const BOAT_FERRY = 1 << 1;
        const RAIL_FERRY = 1 << 2;
        const TUNNEL = 1 << 3;
        const BRIDGE = 1 << 4;
        const DIRT_ROAD = 1 << 5;
        const PRIVATE = 1 << 6;
        const NO_THROUGH_TRAFFIC = 1 << 7;
    }
}

/// One localized line of an exit sign ("Berlin", "Airport").
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocalizedLabel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Highway exit signage attached to a maneuver.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Signpost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exit_directions: Vec<LocalizedLabel>,
}

/// A single maneuver of a calculated route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maneuver {
    pub action: ManeuverAction,
    #[serde(default)]
    pub turn: ManeuverTurn,
    #[serde(default)]
    pub icon: ManeuverIcon,
    /// Meters travelled since the previous maneuver.
    #[serde(default)]
    pub distance_from_previous_maneuver: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_road_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_road_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signpost: Option<Signpost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Point>,
    /// Heading in degrees, clockwise from north.
    #[serde(default)]
    pub map_orientation: u32,
    #[serde(default = "RoadAttributes::empty", with = "attribute_bits")]
    pub road_attributes: RoadAttributes,
}

impl Maneuver {
    /// A maneuver with the given action and no other data.
    pub fn new(action: ManeuverAction) -> Self {
        Self {
            action,
            turn: ManeuverTurn::Undefined,
            icon: ManeuverIcon::Undefined,
            distance_from_previous_maneuver: 0,
            road_name: None,
            road_number: None,
            next_road_name: None,
            next_road_number: None,
            signpost: None,
            coordinates: None,
            map_orientation: 0,
            road_attributes: RoadAttributes::empty(),
        }
    }

    /// Whether this maneuver boards a car shuttle train rather than a boat.
    pub fn is_rail_ferry(&self) -> bool {
        self.road_attributes.contains(RoadAttributes::RAIL_FERRY)
    }
}

/// The attribute mask travels as its raw bits.
mod attribute_bits {
    use super::RoadAttributes;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(attrs: &RoadAttributes, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u32(attrs.bits())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<RoadAttributes, D::Error> {
        u32::deserialize(d).map(RoadAttributes::from_bits_retain)
    }
}

/// Decode a single maneuver from JSON.
pub fn parse_maneuver(json: &str) -> Result<Maneuver, GuidanceError> {
    serde_json::from_str(json).map_err(GuidanceError::decode("maneuver"))
}

/// Decode a maneuver list from a JSON array.
pub fn parse_maneuvers(json: &str) -> Result<Vec<Maneuver>, GuidanceError> {
    serde_json::from_str(json).map_err(GuidanceError::decode("maneuver list"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTE_JSON: &str = r#"[
  {
    "action": "head_to",
    "icon": "start",
    "next_road_name": "Invalidenstraße",
    "coordinates": { "lat": 52.5309, "lon": 13.3845 },
    "map_orientation": 90
  },
  {
    "action": "leave_highway",
    "turn": "keep_right",
    "icon": "leave_highway_right_lane",
    "distance_from_previous_maneuver": 1200,
    "road_number": "A100",
    "signpost": {
      "exit_number": "12",
      "exit_text": "Kaiserdamm",
      "exit_directions": [{ "text": "Charlottenburg", "language": "de" }]
    },
    "coordinates": { "lat": 52.5071, "lon": 13.2806, "ele": 41.0 }
  },
  {
    "action": "ferry",
    "distance_from_previous_maneuver": 300,
    "road_attributes": 4
  }
]"#;

    #[test]
    fn parse_route_json() {
        let maneuvers = parse_maneuvers(ROUTE_JSON).unwrap();

        assert_eq!(maneuvers.len(), 3);
        assert_eq!(maneuvers[0].action, ManeuverAction::HeadTo);
        assert_eq!(maneuvers[0].icon, ManeuverIcon::Start);
        assert_eq!(maneuvers[0].next_road_name.as_deref(), Some("Invalidenstraße"));
        assert_eq!(maneuvers[0].map_orientation, 90);
        assert_eq!(maneuvers[1].turn, ManeuverTurn::KeepRight);
        assert_eq!(maneuvers[1].distance_from_previous_maneuver, 1200);
        assert_eq!(maneuvers[1].coordinates.unwrap().ele, Some(41.0));
    }

    #[test]
    fn parse_signpost() {
        let maneuvers = parse_maneuvers(ROUTE_JSON).unwrap();
        let signpost = maneuvers[1].signpost.as_ref().unwrap();

        assert_eq!(signpost.exit_number.as_deref(), Some("12"));
        assert_eq!(signpost.exit_text.as_deref(), Some("Kaiserdamm"));
        assert_eq!(signpost.exit_directions.len(), 1);
        assert_eq!(signpost.exit_directions[0].text.as_deref(), Some("Charlottenburg"));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let maneuvers = parse_maneuvers(ROUTE_JSON).unwrap();
        let ferry = &maneuvers[2];

        assert_eq!(ferry.turn, ManeuverTurn::Undefined);
        assert_eq!(ferry.icon, ManeuverIcon::Undefined);
        assert!(ferry.coordinates.is_none());
        assert!(ferry.signpost.is_none());
    }

    #[test]
    fn rail_ferry_from_attribute_bits() {
        let maneuvers = parse_maneuvers(ROUTE_JSON).unwrap();
        assert!(maneuvers[2].is_rail_ferry());
        assert!(!maneuvers[1].is_rail_ferry());

        let boat = Maneuver {
            road_attributes: RoadAttributes::BOAT_FERRY | RoadAttributes::TOLLROAD,
            ..Maneuver::new(ManeuverAction::Ferry)
        };
        assert!(!boat.is_rail_ferry());
    }

    #[test]
    fn unknown_attribute_bits_are_kept() {
        let m = parse_maneuver(r#"{ "action": "ferry", "road_attributes": 4100 }"#).unwrap();
        assert!(m.is_rail_ferry());
        assert_eq!(m.road_attributes.bits(), 4100);

        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["road_attributes"], 4100);
    }

    #[test]
    fn icon_codes_are_stable() {
        assert_eq!(ManeuverIcon::Undefined.code(), 0);
        assert_eq!(ManeuverIcon::Roundabout1.code(), 19);
        assert_eq!(ManeuverIcon::Roundabout12Lh.code(), 42);
        assert_eq!(ManeuverIcon::PassStation.code(), 46);
        assert_eq!(ManeuverIcon::ChangeLine.code(), 48);
    }

    #[test]
    fn roundabout_exit_numbers() {
        assert_eq!(ManeuverTurn::Roundabout1.roundabout_exit(), Some(1));
        assert_eq!(ManeuverTurn::Roundabout12.roundabout_exit(), Some(12));
        assert_eq!(ManeuverTurn::KeepLeft.roundabout_exit(), None);
    }

    #[test]
    fn changing_road_actions() {
        assert!(ManeuverAction::Junction.is_changing_road());
        assert!(ManeuverAction::Roundabout.is_changing_road());
        assert!(!ManeuverAction::EnterHighway.is_changing_road());
    }

    #[test]
    fn parse_invalid_json_returns_error() {
        let result = parse_maneuvers("not json at all");
        assert!(matches!(result, Err(GuidanceError::Decode { what: "maneuver list", .. })));
    }

    #[test]
    fn parse_unknown_action_returns_error() {
        assert!(parse_maneuver(r#"{ "action": "teleport" }"#).is_err());
    }
}
