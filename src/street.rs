//! Street name resolution.
//!
//! Turns the road fields of a maneuver into the street text shown on the
//! guidance panel and in the maneuver list. When a maneuver carries no
//! usable road name, the next street is searched for in the maneuvers
//! that follow it, within a fixed distance window.

use crate::identity::{following, maneuvers_equal};
use crate::localization::{keys, Localizer};
use crate::maneuver::{Maneuver, ManeuverAction};

/// How far ahead (in meters) the next street is searched for.
pub const NEXT_STREET_LOOKAHEAD_M: u32 = 750;

/// `s` unless it is missing or whitespace only.
pub(crate) fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// Combine a road name and number into one display string.
///
/// When leaving a highway the signpost (first exit direction, else exit
/// text) wins over the road name.
/// A number already contained in the name is not repeated.
pub fn combine(
    maneuver: Option<&Maneuver>,
    name: Option<&str>,
    number: Option<&str>,
    loc: &Localizer,
) -> Option<String> {
    let name = non_blank(name);

    if let Some(m) = maneuver.filter(|m| m.action == ManeuverAction::LeaveHighway) {
        return signpost_label(m).or(name).map(str::to_owned);
    }

    match (name, non_blank(number)) {
        (Some(name), Some(number)) if !name.contains(number) => {
            Some(loc.format(keys::ROAD_NAME_DIVIDER, &[number, name]))
        }
        (Some(name), _) => Some(name.to_owned()),
        (None, Some(number)) => Some(number.to_owned()),
        (None, None) => None,
    }
}

/// First non-blank exit direction of the signpost, else its exit text.
fn signpost_label(maneuver: &Maneuver) -> Option<&str> {
    let signpost = maneuver.signpost.as_ref()?;
    signpost
        .exit_directions
        .iter()
        .find_map(|label| non_blank(label.text.as_deref()))
        .or_else(|| non_blank(signpost.exit_text.as_deref()))
}

/// All non-blank exit directions of the maneuver's signpost, joined with
/// the list divider.
pub fn exit_directions(maneuver: &Maneuver, loc: &Localizer) -> Option<String> {
    let signpost = maneuver.signpost.as_ref()?;
    signpost
        .exit_directions
        .iter()
        .filter_map(|label| non_blank(label.text.as_deref()))
        .fold(None, |joined: Option<String>, text| match joined {
            None => Some(text.to_owned()),
            Some(joined) => Some(loc.format(keys::LIST_DIVIDER, &[joined.as_str(), text])),
        })
}

/// Text from the maneuver's signpost: exit directions first, then the
/// exit text.
pub fn signpost_text(maneuver: &Maneuver, loc: &Localizer) -> Option<String> {
    exit_directions(maneuver, loc).or_else(|| {
        let signpost = maneuver.signpost.as_ref()?;
        non_blank(signpost.exit_text.as_deref()).map(str::to_owned)
    })
}

/// The formatted exit number of the maneuver's signpost ("Exit 12").
pub fn signpost_exit_number(maneuver: &Maneuver, loc: &Localizer) -> Option<String> {
    let signpost = maneuver.signpost.as_ref()?;
    let number = non_blank(signpost.exit_number.as_deref())?;
    Some(loc.format(keys::EXIT, &[number]))
}

/// The street the traveler is currently on.
///
/// Falls back to the signpost when the maneuver has no road name or
/// number.
pub fn current_street(maneuver: &Maneuver, loc: &Localizer) -> Option<String> {
    combine(
        Some(maneuver),
        maneuver.road_name.as_deref(),
        maneuver.road_number.as_deref(),
        loc,
    )
    .or_else(|| signpost_text(maneuver, loc))
}

/// The maneuver after `last`.
///
/// The engine's next maneuver is preferred unless it is `last` itself,
/// in which case the route is consulted.
fn successor<'a>(
    last: Option<&Maneuver>,
    route: Option<&'a [Maneuver]>,
    engine_next: Option<&'a Maneuver>,
) -> Option<&'a Maneuver> {
    match engine_next {
        Some(next) if !maneuvers_equal(last, Some(next)) => Some(next),
        _ => route.and_then(|route| following(last, route)),
    }
}

/// Walks the maneuvers after a starting maneuver, yielding each candidate
/// with the distance accumulated up to and including it.
///
/// Stops once the accumulated distance reaches the limit or no successor
/// is left. Alternating between the engine's next maneuver and the route
/// can revisit maneuvers, so the walk is also capped at one step per
/// route maneuver plus two.
#[derive(Debug, Clone)]
pub struct Lookahead<'a> {
    current: Option<&'a Maneuver>,
    route: Option<&'a [Maneuver]>,
    engine_next: Option<&'a Maneuver>,
    /// Route index of `current` when walking by position.
    position: Option<usize>,
    distance_m: u32,
    limit_m: u32,
    steps_left: usize,
}

impl<'a> Lookahead<'a> {
    pub fn new(
        after: Option<&Maneuver>,
        route: Option<&'a [Maneuver]>,
        engine_next: Option<&'a Maneuver>,
        limit_m: u32,
    ) -> Self {
        Self {
            current: successor(after, route, engine_next),
            route,
            engine_next,
            position: None,
            distance_m: 0,
            limit_m,
            steps_left: route.map_or(0, <[Maneuver]>::len) + 2,
        }
    }

    /// Walk `route` by position, starting with the maneuver at `start`.
    /// Maneuvers are never looked up by identity, so repeated or
    /// coordinate-less maneuvers do not confuse the walk.
    pub fn starting_at(route: &'a [Maneuver], start: usize, limit_m: u32) -> Self {
        Self {
            current: route.get(start),
            route: Some(route),
            engine_next: None,
            position: Some(start),
            distance_m: 0,
            limit_m,
            steps_left: route.len().saturating_sub(start),
        }
    }

    fn advance(&mut self, from: &'a Maneuver) {
        self.current = match self.position {
            Some(position) => {
                self.position = Some(position + 1);
                self.route.and_then(|route| route.get(position + 1))
            }
            None => successor(Some(from), self.route, self.engine_next),
        };
    }
}

impl<'a> Iterator for Lookahead<'a> {
    type Item = (&'a Maneuver, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.distance_m >= self.limit_m {
            return None;
        }
        let candidate = self.current?;
        if self.steps_left == 0 {
            log::debug!("next street lookahead stopped after revisiting maneuvers");
            return None;
        }
        self.steps_left -= 1;

        self.distance_m = self
            .distance_m
            .saturating_add(candidate.distance_from_previous_maneuver);
        self.advance(candidate);

        Some((candidate, self.distance_m))
    }
}

/// The next street to be reached after `maneuver`.
///
/// Searches the following maneuvers' next-road fields within `limit_m`
/// meters, taking successors from the engine's next maneuver where it has
/// advanced and from `route` otherwise.
pub fn next_street(
    maneuver: Option<&Maneuver>,
    route: Option<&[Maneuver]>,
    engine_next: Option<&Maneuver>,
    limit_m: u32,
    loc: &Localizer,
) -> Option<String> {
    first_street(Lookahead::new(maneuver, route, engine_next, limit_m), limit_m, loc)
}

/// The first next-road street among the lookahead's candidates.
pub fn first_street(mut lookahead: Lookahead<'_>, limit_m: u32, loc: &Localizer) -> Option<String> {
    let street = lookahead.find_map(|(candidate, _)| {
        combine(
            Some(candidate),
            candidate.next_road_name.as_deref(),
            candidate.next_road_number.as_deref(),
            loc,
        )
    });

    if street.is_none() {
        log::trace!("no next street within {limit_m} m");
    }
    street
}

/// The street shown on the guidance panel for an upcoming maneuver.
///
/// Tries the maneuver's own next road, then the lookahead, then the road
/// the maneuver is on, then the signpost exit text.
pub fn panel_street(
    maneuver: &Maneuver,
    route: Option<&[Maneuver]>,
    engine_next: Option<&Maneuver>,
    limit_m: u32,
    loc: &Localizer,
) -> Option<String> {
    combine(
        Some(maneuver),
        maneuver.next_road_name.as_deref(),
        maneuver.next_road_number.as_deref(),
        loc,
    )
    .or_else(|| next_street(Some(maneuver), route, engine_next, limit_m, loc))
    .or_else(|| {
        combine(
            Some(maneuver),
            maneuver.road_name.as_deref(),
            maneuver.road_number.as_deref(),
            loc,
        )
    })
    .or_else(|| {
        let signpost = maneuver.signpost.as_ref()?;
        non_blank(signpost.exit_text.as_deref()).map(str::to_owned)
    })
}
