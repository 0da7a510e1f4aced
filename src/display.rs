//! Display records for maneuvers.
//!
//! Assembles everything a guidance panel or maneuver list row shows for
//! one maneuver: icon, distance, exit number, street and instruction.
//! Each field is resolved on its own; a missing value leaves that field
//! empty and the view hides it.

use serde::{Deserialize, Serialize};

use crate::instruction::{icon_key, instruction_or_heading};
use crate::localization::{keys, Localizer};
use crate::maneuver::Maneuver;
use crate::identity::maneuvers_equal;
use crate::street::{
    combine, exit_directions, first_street, next_street, signpost_exit_number, Lookahead,
    NEXT_STREET_LOOKAHEAD_M,
};

/// What is shown for a single maneuver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRecord {
    /// Icon file name, `None` if the maneuver has no icon.
    pub icon_key: Option<String>,
    /// Meters from this maneuver to the one after it, 0 if unknown.
    pub distance: u32,
    /// Exit number phrase, only present when the signpost has one.
    pub primary_text: Option<String>,
    /// Street the maneuver leads onto.
    pub secondary_text: Option<String>,
    /// Instruction phrase, or the compass heading when there is none.
    pub instruction: String,
}

/// Resolves display records for the maneuvers of one route.
#[derive(Debug, Clone, Copy)]
pub struct ManeuverDisplay<'a> {
    maneuvers: &'a [Maneuver],
    fallback_route: Option<&'a [Maneuver]>,
    engine_next: Option<&'a Maneuver>,
    lookahead_m: u32,
    loc: &'a Localizer,
}

impl<'a> ManeuverDisplay<'a> {
    pub fn new(maneuvers: &'a [Maneuver], loc: &'a Localizer) -> Self {
        Self {
            maneuvers,
            fallback_route: None,
            engine_next: None,
            lookahead_m: NEXT_STREET_LOOKAHEAD_M,
            loc,
        }
    }

    /// Route searched for following maneuvers. Defaults to `maneuvers`.
    pub fn with_fallback_route(mut self, route: Option<&'a [Maneuver]>) -> Self {
        self.fallback_route = route;
        self
    }

    /// The engine's current next maneuver.
    pub fn with_engine_next(mut self, engine_next: Option<&'a Maneuver>) -> Self {
        self.engine_next = engine_next;
        self
    }

    pub fn with_lookahead(mut self, lookahead_m: u32) -> Self {
        self.lookahead_m = lookahead_m;
        self
    }

    /// The display record for the maneuver at `index`.
    pub fn assemble(&self, index: usize) -> Option<DisplayRecord> {
        let maneuver = self.maneuvers.get(index)?;

        let primary_text = signpost_exit_number(maneuver, self.loc);
        let secondary_text = self
            .road_name(index)
            .filter(|road| primary_text.as_ref() != Some(road));

        Some(DisplayRecord {
            icon_key: icon_key(maneuver),
            distance: self.distance(index),
            primary_text,
            secondary_text,
            instruction: instruction_or_heading(maneuver, self.loc),
        })
    }

    /// Records for every maneuver, in order.
    pub fn assemble_all(&self) -> Vec<DisplayRecord> {
        (0..self.maneuvers.len())
            .filter_map(|index| self.assemble(index))
            .collect()
    }

    /// Distance to the maneuver after `index`, 0 if there is none.
    pub fn distance(&self, index: usize) -> u32 {
        self.maneuvers
            .get(index + 1)
            .map_or(0, |next| next.distance_from_previous_maneuver)
    }

    /// Street the maneuver at `index` leads onto.
    ///
    /// Junctions, roundabouts and the first maneuver show the road they
    /// turn onto; other maneuvers show the road they are on. Without
    /// either, the streets of the following maneuvers are searched.
    pub fn road_name(&self, index: usize) -> Option<String> {
        let maneuver = self.maneuvers.get(index)?;

        let (name, number) = if maneuver.action.is_changing_road() || index == 0 {
            (maneuver.next_road_name.as_deref(), maneuver.next_road_number.as_deref())
        } else {
            (maneuver.road_name.as_deref(), maneuver.road_number.as_deref())
        };

        combine(Some(maneuver), name, number, self.loc).or_else(|| self.street_ahead(index, maneuver))
    }

    /// Next street after the maneuver at `index`. The engine's next
    /// maneuver and a separate fallback route are found by identity;
    /// otherwise the list itself is walked from `index + 1`.
    fn street_ahead(&self, index: usize, maneuver: &Maneuver) -> Option<String> {
        let engine_ahead = self
            .engine_next
            .filter(|next| !maneuvers_equal(Some(maneuver), Some(*next)));

        if self.fallback_route.is_some() || engine_ahead.is_some() {
            let route = self.fallback_route.unwrap_or(self.maneuvers);
            return next_street(Some(maneuver), Some(route), self.engine_next, self.lookahead_m, self.loc);
        }

        let walk = Lookahead::starting_at(self.maneuvers, index + 1, self.lookahead_m);
        first_street(walk, self.lookahead_m, self.loc)
    }

    /// Road name followed by the signpost's exit directions, for list rows.
    pub fn road_to_display(&self, index: usize) -> Option<String> {
        let maneuver = self.maneuvers.get(index)?;
        let road = self.road_name(index);

        match (road, exit_directions(maneuver, self.loc)) {
            (Some(road), Some(directions)) => Some(
                self.loc
                    .format(keys::EXIT_DIRECTIONS_TOWARDS, &[road.as_str(), directions.as_str()]),
            ),
            (road, directions) => road.or(directions),
        }
    }
}

/// The display record for the maneuver at `index` of `maneuvers`.
///
/// Returns `None` if `index` is out of bounds.
pub fn assemble(
    maneuvers: &[Maneuver],
    index: usize,
    fallback_route: Option<&[Maneuver]>,
    engine_next: Option<&Maneuver>,
    loc: &Localizer,
) -> Option<DisplayRecord> {
    ManeuverDisplay::new(maneuvers, loc)
        .with_fallback_route(fallback_route)
        .with_engine_next(engine_next)
        .assemble(index)
}

/// Records for every maneuver of `maneuvers`.
pub fn assemble_all(
    maneuvers: &[Maneuver],
    fallback_route: Option<&[Maneuver]>,
    engine_next: Option<&Maneuver>,
    loc: &Localizer,
) -> Vec<DisplayRecord> {
    ManeuverDisplay::new(maneuvers, loc)
        .with_fallback_route(fallback_route)
        .with_engine_next(engine_next)
        .assemble_all()
}
