//! Maneuver instructions and icons.
//!
//! Maps the action and turn of a maneuver to a localized instruction
//! phrase. Maneuvers without a phrase of their own (heading out from the
//! start, passing a junction) are described by their compass heading.

use crate::localization::{keys, Localizer};
use crate::maneuver::{Maneuver, ManeuverAction, ManeuverIcon, ManeuverTurn};

/// Icon used for car shuttle trains instead of the generic ferry icon.
pub const MOTORAIL_ICON: &str = "maneuver_icon_motorail";

fn action_key(action: ManeuverAction) -> Option<&'static str> {
    let key = match action {
        ManeuverAction::End => keys::ARRIVE_AT,
        ManeuverAction::EnterHighway => keys::ENTER_HIGHWAY,
        // Merging from the left means keeping right, and vice versa
        ManeuverAction::EnterHighwayFromLeft => keys::TURN_KEEP_RIGHT,
        ManeuverAction::EnterHighwayFromRight => keys::TURN_KEEP_LEFT,
        ManeuverAction::LeaveHighway => keys::LEAVE_HIGHWAY,
        ManeuverAction::UTurn => keys::UTURN,
        _ => return None,
    };
    Some(key)
}

fn turn_key(turn: ManeuverTurn) -> Option<&'static str> {
    if let Some(exit) = turn.roundabout_exit() {
        return keys::TURN_ROUNDABOUT_EXIT.get(usize::from(exit) - 1).copied();
    }

    let key = match turn {
        ManeuverTurn::HeavyLeft => keys::TURN_SHARPLY_LEFT,
        ManeuverTurn::HeavyRight => keys::TURN_SHARPLY_RIGHT,
        ManeuverTurn::KeepLeft => keys::TURN_KEEP_LEFT,
        ManeuverTurn::KeepMiddle => keys::TURN_KEEP_MIDDLE,
        ManeuverTurn::KeepRight => keys::TURN_KEEP_RIGHT,
        ManeuverTurn::LightLeft => keys::TURN_SLIGHTLY_LEFT,
        ManeuverTurn::LightRight => keys::TURN_SLIGHTLY_RIGHT,
        ManeuverTurn::QuiteLeft => keys::TURN_LEFT,
        ManeuverTurn::QuiteRight => keys::TURN_RIGHT,
        _ => return None,
    };
    Some(key)
}

/// The localized instruction for a maneuver, if its action and turn have one.
pub fn instruction(maneuver: &Maneuver, loc: &Localizer) -> Option<String> {
    let phrase = match maneuver.action {
        ManeuverAction::ChangeHighway | ManeuverAction::ContinueHighway => {
            if maneuver.turn.is_keep() {
                turn_key(maneuver.turn).and_then(|key| loc.lookup(key))
            } else {
                Some(loc.text(keys::CONTINUE))
            }
        }
        ManeuverAction::Ferry => {
            let key = if maneuver.is_rail_ferry() {
                keys::ENTER_CAR_SHUTTLE_TRAIN
            } else {
                keys::ENTER_FERRY
            };
            Some(loc.text(key))
        }
        ManeuverAction::Junction | ManeuverAction::Roundabout => {
            turn_key(maneuver.turn).and_then(|key| loc.lookup(key))
        }
        action => action_key(action).and_then(|key| loc.lookup(key)),
    };

    phrase.filter(|p| !p.trim().is_empty()).map(str::to_owned)
}

/// The localized compass direction for a heading in degrees.
///
/// Each of the eight directions covers a 45 degree octant centred on it.
/// Returns an empty string if the direction has no name.
pub fn orientation(angle_deg: u32, loc: &Localizer) -> String {
    let index = ((angle_deg % 360 + 45 / 2) % 360 / 45) as usize;
    keys::ORIENTATION
        .get(index)
        .map(|key| loc.text(key).to_owned())
        .unwrap_or_default()
}

/// "Head north" style instruction from the maneuver's map orientation.
pub fn head_to(maneuver: &Maneuver, loc: &Localizer) -> String {
    let direction = orientation(maneuver.map_orientation, loc);
    loc.format(keys::HEAD_TO, &[direction.as_str()])
}

/// The maneuver's instruction, falling back to its compass heading.
pub fn instruction_or_heading(maneuver: &Maneuver, loc: &Localizer) -> String {
    instruction(maneuver, loc).unwrap_or_else(|| {
        log::trace!("no instruction for {:?}/{:?}, using heading", maneuver.action, maneuver.turn);
        head_to(maneuver, loc)
    })
}

/// Icon file name for a maneuver.
///
/// Car shuttle trains get the motorail icon; passing a station has no icon.
pub fn icon_key(maneuver: &Maneuver) -> Option<String> {
    if maneuver.action == ManeuverAction::Ferry && maneuver.is_rail_ferry() {
        return Some(MOTORAIL_ICON.to_string());
    }

    match maneuver.icon {
        ManeuverIcon::PassStation => None,
        icon => Some(format!("maneuver_icon_{}", icon.code())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maneuver::RoadAttributes;

    fn loc() -> Localizer {
        Localizer::english()
    }

    fn maneuver(action: ManeuverAction, turn: ManeuverTurn) -> Maneuver {
        Maneuver { turn, ..Maneuver::new(action) }
    }

    fn rail_ferry() -> Maneuver {
        Maneuver {
            road_attributes: RoadAttributes::RAIL_FERRY,
            icon: ManeuverIcon::Ferry,
            ..Maneuver::new(ManeuverAction::Ferry)
        }
    }

    #[test]
    fn highway_keep_turns() {
        let m = maneuver(ManeuverAction::ChangeHighway, ManeuverTurn::KeepMiddle);
        assert_eq!(instruction(&m, &loc()).as_deref(), Some("Keep middle"));

        let m = maneuver(ManeuverAction::ContinueHighway, ManeuverTurn::KeepLeft);
        assert_eq!(instruction(&m, &loc()).as_deref(), Some("Keep left"));
    }

    #[test]
    fn highway_other_turns_continue() {
        let m = maneuver(ManeuverAction::ContinueHighway, ManeuverTurn::QuiteRight);
        assert_eq!(instruction(&m, &loc()).as_deref(), Some("Continue on the highway"));

        let m = maneuver(ManeuverAction::ChangeHighway, ManeuverTurn::Undefined);
        assert_eq!(instruction(&m, &loc()).as_deref(), Some("Continue on the highway"));
    }

    #[test]
    fn ferry_kinds() {
        let boat = Maneuver::new(ManeuverAction::Ferry);
        assert_eq!(instruction(&boat, &loc()).as_deref(), Some("Take the ferry"));
        assert_eq!(instruction(&rail_ferry(), &loc()).as_deref(), Some("Take the car shuttle train"));
    }

    #[test]
    fn junction_and_roundabout_use_turn() {
        let m = maneuver(ManeuverAction::Junction, ManeuverTurn::HeavyLeft);
        assert_eq!(instruction(&m, &loc()).as_deref(), Some("Turn sharply left"));

        let m = maneuver(ManeuverAction::Roundabout, ManeuverTurn::Roundabout3);
        assert_eq!(instruction(&m, &loc()).as_deref(), Some("At the roundabout, take the 3rd exit"));

        let m = maneuver(ManeuverAction::Roundabout, ManeuverTurn::Roundabout12);
        assert_eq!(instruction(&m, &loc()).as_deref(), Some("At the roundabout, take the 12th exit"));
    }

    #[test]
    fn junction_without_turn_phrase() {
        let m = maneuver(ManeuverAction::Junction, ManeuverTurn::NoTurn);
        assert_eq!(instruction(&m, &loc()), None);
    }

    #[test]
    fn other_actions_use_action() {
        let cases = [
            (ManeuverAction::End, Some("Arrive at your destination")),
            (ManeuverAction::EnterHighway, Some("Enter the highway")),
            (ManeuverAction::EnterHighwayFromLeft, Some("Keep right")),
            (ManeuverAction::EnterHighwayFromRight, Some("Keep left")),
            (ManeuverAction::LeaveHighway, Some("Take the exit")),
            (ManeuverAction::UTurn, Some("Make a U-turn")),
            (ManeuverAction::HeadTo, None),
            (ManeuverAction::PassJunction, None),
        ];
        for (action, expected) in cases {
            let m = maneuver(action, ManeuverTurn::QuiteLeft);
            assert_eq!(instruction(&m, &loc()).as_deref(), expected, "{action:?}");
        }
    }

    #[test]
    fn blank_phrase_counts_as_missing() {
        let blank = Localizer::english().with_overrides([(keys::UTURN, " ")]);
        let m = maneuver(ManeuverAction::UTurn, ManeuverTurn::Return);
        assert_eq!(instruction(&m, &blank), None);
    }

    #[test]
    fn orientation_octants() {
        assert_eq!(orientation(0, &loc()), "north");
        assert_eq!(orientation(22, &loc()), "north");
        assert_eq!(orientation(23, &loc()), "northeast");
        assert_eq!(orientation(90, &loc()), "east");
        assert_eq!(orientation(180, &loc()), "south");
        assert_eq!(orientation(337, &loc()), "northwest");
    }

    #[test]
    fn orientation_wraps_around() {
        assert_eq!(orientation(359, &loc()), "north");
        assert_eq!(orientation(338, &loc()), "north");
        assert_eq!(orientation(720 + 90, &loc()), "east");
        assert_eq!(orientation(u32::MAX, &loc()), orientation(u32::MAX % 360, &loc()));
    }

    #[test]
    fn heading_fallback() {
        let m = Maneuver { map_orientation: 359, ..Maneuver::new(ManeuverAction::HeadTo) };
        assert_eq!(instruction_or_heading(&m, &loc()), "Head north");

        let m = Maneuver { map_orientation: 270, ..Maneuver::new(ManeuverAction::UTurn) };
        assert_eq!(instruction_or_heading(&m, &loc()), "Make a U-turn");
    }

    #[test]
    fn icon_keys() {
        let m = Maneuver { icon: ManeuverIcon::Roundabout2, ..Maneuver::new(ManeuverAction::Roundabout) };
        assert_eq!(icon_key(&m).as_deref(), Some("maneuver_icon_20"));

        let boat = Maneuver { icon: ManeuverIcon::Ferry, ..Maneuver::new(ManeuverAction::Ferry) };
        assert_eq!(icon_key(&boat).as_deref(), Some("maneuver_icon_45"));
        assert_eq!(icon_key(&rail_ferry()).as_deref(), Some(MOTORAIL_ICON));
    }

    #[test]
    fn pass_station_has_no_icon() {
        let m = Maneuver { icon: ManeuverIcon::PassStation, ..Maneuver::new(ManeuverAction::PassStation) };
        assert_eq!(icon_key(&m), None);
    }
}
