//! Localized strings.
//!
//! A `Localizer` is a read-only string table handed to every resolver
//! that produces text. It starts from the built-in English table and can
//! be overlaid with a locale's strings decoded from JSON. Templates use
//! Foundation-style placeholders: `%@` takes the next argument, `%1$@`
//! takes an explicit (1-based) argument and `%%` is a literal percent.

use std::collections::HashMap;

use crate::error::GuidanceError;

/// Localization keys consumed by the resolvers.
pub mod keys {
    pub const ROAD_NAME_DIVIDER: &str = "maneuver_road_name_divider";
    pub const LIST_DIVIDER: &str = "maneuver_list_divider";
    pub const EXIT: &str = "maneuver_exit";
    pub const EXIT_DIRECTIONS_TOWARDS: &str = "maneuver_exit_directions_towards";
    pub const HEAD_TO: &str = "maneuver_head_to";
    pub const CONTINUE: &str = "maneuver_continue";
    pub const ENTER_FERRY: &str = "maneuver_enter_ferry";
    pub const ENTER_CAR_SHUTTLE_TRAIN: &str = "maneuver_enter_car_shuttle_train";

    pub const ARRIVE_AT: &str = "maneuver_arrive_at";
    pub const ENTER_HIGHWAY: &str = "maneuver_enter_highway";
    pub const LEAVE_HIGHWAY: &str = "maneuver_leave_highway";
    pub const UTURN: &str = "maneuver_uturn";

    pub const TURN_SHARPLY_LEFT: &str = "maneuver_turn_sharply_left";
    pub const TURN_SHARPLY_RIGHT: &str = "maneuver_turn_sharply_right";
    pub const TURN_KEEP_LEFT: &str = "maneuver_turn_keep_left";
    pub const TURN_KEEP_MIDDLE: &str = "maneuver_turn_keep_middle";
    pub const TURN_KEEP_RIGHT: &str = "maneuver_turn_keep_right";
    pub const TURN_SLIGHTLY_LEFT: &str = "maneuver_turn_slightly_left";
    pub const TURN_SLIGHTLY_RIGHT: &str = "maneuver_turn_slightly_right";
    pub const TURN_LEFT: &str = "maneuver_turn_left";
    pub const TURN_RIGHT: &str = "maneuver_turn_right";

    /// Indexed by exit number minus one.
    pub const TURN_ROUNDABOUT_EXIT: [&str; 12] = [
        "maneuver_turn_roundabout_exit_1",
        "maneuver_turn_roundabout_exit_2",
        "maneuver_turn_roundabout_exit_3",
        "maneuver_turn_roundabout_exit_4",
        "maneuver_turn_roundabout_exit_5",
        "maneuver_turn_roundabout_exit_6",
        "maneuver_turn_roundabout_exit_7",
        "maneuver_turn_roundabout_exit_8",
        "maneuver_turn_roundabout_exit_9",
        "maneuver_turn_roundabout_exit_10",
        "maneuver_turn_roundabout_exit_11",
        "maneuver_turn_roundabout_exit_12",
    ];

    /// Clockwise from north, one per 45 degree octant.
    pub const ORIENTATION: [&str; 8] = [
        "maneuver_orientation_north",
        "maneuver_orientation_north_east",
        "maneuver_orientation_east",
        "maneuver_orientation_south_east",
        "maneuver_orientation_south",
        "maneuver_orientation_south_west",
        "maneuver_orientation_west",
        "maneuver_orientation_north_west",
    ];

    pub const UNIT_METERS: &str = "unit_meters";
    pub const UNIT_KILOMETERS: &str = "unit_kilometers";
    pub const UNIT_FEET: &str = "unit_feet";
    pub const UNIT_YARDS: &str = "unit_yards";
    pub const UNIT_MILES: &str = "unit_miles";
    pub const UNIT_KMH: &str = "unit_kmh";
    pub const UNIT_MPH: &str = "unit_mph";
    pub const UNIT_MINUTES: &str = "unit_minutes";
    pub const UNIT_HOURS_MINUTES: &str = "unit_hours_minutes";
}

const ENGLISH: &[(&str, &str)] = &[
    (keys::ROAD_NAME_DIVIDER, "%@ %@"),
    (keys::LIST_DIVIDER, "%@, %@"),
    (keys::EXIT, "Exit %@"),
    (keys::EXIT_DIRECTIONS_TOWARDS, "%@ towards %@"),
    (keys::HEAD_TO, "Head %@"),
    (keys::CONTINUE, "Continue on the highway"),
    (keys::ENTER_FERRY, "Take the ferry"),
    (keys::ENTER_CAR_SHUTTLE_TRAIN, "Take the car shuttle train"),
    (keys::ARRIVE_AT, "Arrive at your destination"),
    (keys::ENTER_HIGHWAY, "Enter the highway"),
    (keys::LEAVE_HIGHWAY, "Take the exit"),
    (keys::UTURN, "Make a U-turn"),
    (keys::TURN_SHARPLY_LEFT, "Turn sharply left"),
    (keys::TURN_SHARPLY_RIGHT, "Turn sharply right"),
    (keys::TURN_KEEP_LEFT, "Keep left"),
    (keys::TURN_KEEP_MIDDLE, "Keep middle"),
    (keys::TURN_KEEP_RIGHT, "Keep right"),
    (keys::TURN_SLIGHTLY_LEFT, "Turn slightly left"),
    (keys::TURN_SLIGHTLY_RIGHT, "Turn slightly right"),
    (keys::TURN_LEFT, "Turn left"),
    (keys::TURN_RIGHT, "Turn right"),
    ("maneuver_turn_roundabout_exit_1", "At the roundabout, take the 1st exit"),
    ("maneuver_turn_roundabout_exit_2", "At the roundabout, take the 2nd exit"),
    ("maneuver_turn_roundabout_exit_3", "At the roundabout, take the 3rd exit"),
    ("maneuver_turn_roundabout_exit_4", "At the roundabout, take the 4th exit"),
    ("maneuver_turn_roundabout_exit_5", "At the roundabout, take the 5th exit"),
    ("maneuver_turn_roundabout_exit_6", "At the roundabout, take the 6th exit"),
    ("maneuver_turn_roundabout_exit_7", "At the roundabout, take the 7th exit"),
    ("maneuver_turn_roundabout_exit_8", "At the roundabout, take the 8th exit"),
    ("maneuver_turn_roundabout_exit_9", "At the roundabout, take the 9th exit"),
    ("maneuver_turn_roundabout_exit_10", "At the roundabout, take the 10th exit"),
    ("maneuver_turn_roundabout_exit_11", "At the roundabout, take the 11th exit"),
    ("maneuver_turn_roundabout_exit_12", "At the roundabout, take the 12th exit"),
    ("maneuver_orientation_north", "north"),
    ("maneuver_orientation_north_east", "northeast"),
    ("maneuver_orientation_east", "east"),
    ("maneuver_orientation_south_east", "southeast"),
    ("maneuver_orientation_south", "south"),
    ("maneuver_orientation_south_west", "southwest"),
    ("maneuver_orientation_west", "west"),
    ("maneuver_orientation_north_west", "northwest"),
    (keys::UNIT_METERS, "%@ m"),
    (keys::UNIT_KILOMETERS, "%@ km"),
    (keys::UNIT_FEET, "%@ ft"),
    (keys::UNIT_YARDS, "%@ yd"),
    (keys::UNIT_MILES, "%@ mi"),
    (keys::UNIT_KMH, "%@ km/h"),
    (keys::UNIT_MPH, "%@ mph"),
    (keys::UNIT_MINUTES, "%@ min"),
    (keys::UNIT_HOURS_MINUTES, "%@ h %@ min"),
];

/// Read-only table of localized strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Localizer {
    strings: HashMap<String, String>,
}

impl Default for Localizer {
    fn default() -> Self {
        Self::english()
    }
}

impl Localizer {
    /// The built-in English table.
    pub fn english() -> Self {
        let strings = ENGLISH
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self { strings }
    }

    /// Overlay entries on top of this table.
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.strings
            .extend(overrides.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// English table overlaid with a JSON object of `key: string` pairs.
    pub fn from_json(json: &str) -> Result<Self, GuidanceError> {
        let overrides: HashMap<String, String> =
            serde_json::from_str(json).map_err(GuidanceError::decode("string table"))?;
        Ok(Self::english().with_overrides(overrides))
    }

    /// The string for `key`, if the table has one.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    /// The string for `key`, or the key itself when missing.
    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        match self.lookup(key) {
            Some(value) => value,
            None => {
                log::warn!("missing localized string: {key}");
                key
            }
        }
    }

    /// Fill the template for `key` with `args`.
    pub fn format(&self, key: &str, args: &[&str]) -> String {
        format_template(self.text(key), args)
    }
}

/// Substitute `%@`, `%N$@` and `%%` placeholders in `template`.
///
/// Placeholders without a matching argument expand to nothing.
pub fn format_template(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len() + args.iter().map(|a| a.len()).sum::<usize>());
    let mut chars = template.chars().peekable();
    let mut next_arg = 0;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some('@') => {
                chars.next();
                out.push_str(args.get(next_arg).copied().unwrap_or(""));
                next_arg += 1;
            }
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(d) if d.is_ascii_digit() => {
                let mut ahead = chars.clone();
                let mut position: usize = 0;
                while let Some(digit) = ahead.peek().and_then(|c| c.to_digit(10)) {
                    position = position.saturating_mul(10).saturating_add(digit as usize);
                    ahead.next();
                }
                if position > 0 && ahead.next() == Some('$') && ahead.next() == Some('@') {
                    chars = ahead;
                    out.push_str(args.get(position - 1).copied().unwrap_or(""));
                } else {
                    out.push('%');
                }
            }
            _ => out.push('%'),
        }
    }

    out
}
