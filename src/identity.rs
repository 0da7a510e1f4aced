//! Maneuver identity.
//!
//! The navigation engine does not hand out stable maneuver objects across
//! callbacks, so a maneuver is identified by where it is and what it does.

use crate::maneuver::Maneuver;

/// Whether two maneuvers denote the same maneuver.
///
/// Two absent maneuvers are equal. Otherwise both must be present, both
/// must carry coordinates, and coordinates and action must match exactly.
pub fn maneuvers_equal(a: Option<&Maneuver>, b: Option<&Maneuver>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => match (&a.coordinates, &b.coordinates) {
            (Some(ca), Some(cb)) => ca == cb && a.action == b.action,
            _ => false,
        },
        _ => false,
    }
}

/// Position of `maneuver` in `maneuvers`, scanning from the start.
///
/// An absent target never matches: list elements are always present.
pub fn index_of(maneuver: Option<&Maneuver>, maneuvers: &[Maneuver]) -> Option<usize> {
    let target = maneuver?;
    maneuvers
        .iter()
        .position(|candidate| maneuvers_equal(Some(candidate), Some(target)))
}

/// The maneuver following `maneuver` in `maneuvers`, if any.
pub fn following<'a>(maneuver: Option<&Maneuver>, maneuvers: &'a [Maneuver]) -> Option<&'a Maneuver> {
    index_of(maneuver, maneuvers).and_then(|index| maneuvers.get(index + 1))
}
