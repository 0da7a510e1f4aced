//! Live guidance.
//!
//! The navigation engine reports progress as a stream of
//! `NavigationEvent`s. A `GuidanceMonitor` keeps the little state those
//! events imply (current and next maneuver, last speed) and turns each
//! event into the `GuidanceUpdate`s the guidance views consume. The
//! monitor can be driven directly with `handle` or fed through a channel
//! with `run`.

use std::sync::mpsc::{Receiver, Sender};

use serde::{Deserialize, Serialize};

use crate::config::GuidanceConfig;
use crate::instruction::icon_key;
use crate::localization::Localizer;
use crate::maneuver::Maneuver;
use crate::street::{current_street, panel_street, signpost_exit_number};
use crate::units::{format_distance, format_duration, format_speed};

/// Values reported by the engine on every position fix. Fields the engine
/// could not determine are `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionUpdate {
    pub speed_mps: Option<f64>,
    pub speed_limit_mps: Option<f64>,
    pub distance_to_current_maneuver_m: Option<u32>,
    pub time_to_arrival_s: Option<f64>,
    pub distance_to_destination_m: Option<u32>,
}

/// Something the navigation engine reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavigationEvent {
    PositionUpdated(PositionUpdate),
    /// `current` is the upcoming maneuver, `next` the one after it.
    ManeuverChanged {
        current: Option<Maneuver>,
        next: Option<Maneuver>,
    },
    ReroutingStarted,
    /// The route was recalculated; `None` if no route is available.
    RouteUpdated { route: Option<Vec<Maneuver>> },
    DestinationReached,
}

/// Contents of the maneuver panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManeuverPanelData {
    pub icon_key: Option<String>,
    /// Formatted distance to the maneuver, once a position is known.
    pub distance: Option<String>,
    /// Exit number; shown above the street when present.
    pub info1: Option<String>,
    /// Street the maneuver leads onto.
    pub info2: Option<String>,
}

/// Preview of the maneuver after the upcoming one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextManeuverData {
    pub icon_key: Option<String>,
    pub distance_m: u32,
    pub distance: String,
    pub street: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedData {
    pub speed_mps: f64,
    pub speed_limit_mps: Option<f64>,
    /// Only true when a speed limit is known and exceeded.
    pub is_speeding: bool,
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrivalData {
    pub duration_s: Option<f64>,
    pub distance_m: Option<u32>,
    pub formatted_duration: Option<String>,
    pub formatted_distance: Option<String>,
}

/// Something a guidance view should show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum GuidanceUpdate {
    /// `None` clears the panel, e.g. while rerouting.
    ManeuverPanel(Option<ManeuverPanelData>),
    /// `None` hides the preview: no next maneuver, or too far away.
    NextManeuver(Option<NextManeuverData>),
    CurrentStreet(Option<String>),
    Speed(SpeedData),
    EstimatedArrival(ArrivalData),
    DestinationReached,
}

/// Turns navigation events into guidance updates.
#[derive(Debug, Clone)]
pub struct GuidanceMonitor {
    config: GuidanceConfig,
    loc: Localizer,
    route: Option<Vec<Maneuver>>,
    current: Option<Maneuver>,
    next: Option<Maneuver>,
    distance_to_current_m: Option<u32>,
    speed_mps: f64,
    speed_limit_mps: Option<f64>,
}

impl GuidanceMonitor {
    pub fn new(config: GuidanceConfig, route: Option<Vec<Maneuver>>) -> Self {
        let loc = config.localizer();
        Self {
            config,
            loc,
            route,
            current: None,
            next: None,
            distance_to_current_m: None,
            speed_mps: 0.0,
            speed_limit_mps: None,
        }
    }

    /// Replace the route used as a fallback for street lookups. After a
    /// reroute the caller is responsible for handing in the new route.
    pub fn update_route(&mut self, route: Option<Vec<Maneuver>>) {
        self.route = route;
    }

    pub fn localizer(&self) -> &Localizer {
        &self.loc
    }

    /// Apply one event and return the resulting updates, in order.
    pub fn handle(&mut self, event: NavigationEvent) -> Vec<GuidanceUpdate> {
        let mut updates = Vec::new();

        match event {
            NavigationEvent::PositionUpdated(position) => {
                if position.distance_to_current_maneuver_m.is_some() {
                    self.distance_to_current_m = position.distance_to_current_maneuver_m;
                }
                if let Some(current) = &self.current {
                    updates.push(GuidanceUpdate::ManeuverPanel(Some(self.panel_data(current))));
                }
                self.speed_updates(&position, &mut updates);
                if let Some(arrival) = self.arrival_data(&position) {
                    updates.push(GuidanceUpdate::EstimatedArrival(arrival));
                }
            }
            NavigationEvent::ManeuverChanged { current, next } => {
                log::debug!(
                    "maneuver changed: current {:?}, next {:?}",
                    current.as_ref().map(|m| m.action),
                    next.as_ref().map(|m| m.action),
                );
                self.current = current;
                self.next = next;

                if let Some(current) = &self.current {
                    updates.push(GuidanceUpdate::ManeuverPanel(Some(self.panel_data(current))));
                }
                updates.push(GuidanceUpdate::NextManeuver(self.next_maneuver_data()));
                updates.push(GuidanceUpdate::CurrentStreet(
                    self.current.as_ref().and_then(|m| current_street(m, &self.loc)),
                ));
            }
            NavigationEvent::ReroutingStarted => {
                log::debug!("rerouting, clearing maneuver panel");
                updates.push(GuidanceUpdate::ManeuverPanel(None));
            }
            NavigationEvent::RouteUpdated { route } => {
                log::debug!("route updated: {} maneuvers", route.as_ref().map_or(0, Vec::len));
                self.update_route(route);
            }
            NavigationEvent::DestinationReached => {
                log::info!("destination reached");
                updates.push(GuidanceUpdate::DestinationReached);
            }
        }

        updates
    }

    /// Handle events from `events` until it closes, forwarding updates to
    /// `updates`. Returns early once nobody listens for updates anymore.
    pub fn run(&mut self, events: Receiver<NavigationEvent>, updates: Sender<GuidanceUpdate>) {
        for event in events.iter() {
            for update in self.handle(event) {
                if updates.send(update).is_err() {
                    log::debug!("guidance update receiver closed");
                    return;
                }
            }
        }
        log::debug!("navigation event stream closed");
    }

    fn panel_data(&self, maneuver: &Maneuver) -> ManeuverPanelData {
        ManeuverPanelData {
            icon_key: icon_key(maneuver),
            distance: self
                .distance_to_current_m
                .map(|meters| format_distance(f64::from(meters), self.config.unit_system, &self.loc)),
            info1: signpost_exit_number(maneuver, &self.loc),
            info2: self.street_for(maneuver),
        }
    }

    fn next_maneuver_data(&self) -> Option<NextManeuverData> {
        let next = self
            .next
            .as_ref()
            .filter(|m| m.distance_from_previous_maneuver < self.config.next_maneuver_max_distance_m)?;
        let distance_m = next.distance_from_previous_maneuver;

        Some(NextManeuverData {
            icon_key: icon_key(next),
            distance_m,
            distance: format_distance(f64::from(distance_m), self.config.unit_system, &self.loc),
            street: self.street_for(next),
        })
    }

    fn street_for(&self, maneuver: &Maneuver) -> Option<String> {
        panel_street(
            maneuver,
            self.route.as_deref(),
            self.next.as_ref(),
            self.config.next_street_lookahead_m,
            &self.loc,
        )
    }

    fn speed_updates(&mut self, position: &PositionUpdate, updates: &mut Vec<GuidanceUpdate>) {
        let speed = position
            .speed_mps
            .filter(|speed| speed.is_finite() && *speed >= 0.0);
        if let Some(speed) = speed.filter(|speed| *speed != self.speed_mps) {
            self.speed_mps = speed;
            updates.push(GuidanceUpdate::Speed(self.speed_data()));
        }

        let limit = position
            .speed_limit_mps
            .filter(|limit| limit.is_finite() && *limit > 0.0);
        if limit != self.speed_limit_mps {
            self.speed_limit_mps = limit;
            updates.push(GuidanceUpdate::Speed(self.speed_data()));
        }
    }

    fn speed_data(&self) -> SpeedData {
        SpeedData {
            speed_mps: self.speed_mps,
            speed_limit_mps: self.speed_limit_mps,
            is_speeding: self
                .speed_limit_mps
                .is_some_and(|limit| self.speed_mps > limit),
            formatted: format_speed(self.speed_mps, self.config.unit_system, &self.loc),
        }
    }

    fn arrival_data(&self, position: &PositionUpdate) -> Option<ArrivalData> {
        let duration_s = position.time_to_arrival_s.filter(|s| s.is_finite() && *s >= 0.0);
        let distance_m = position.distance_to_destination_m;
        if duration_s.is_none() && distance_m.is_none() {
            return None;
        }

        Some(ArrivalData {
            duration_s,
            distance_m,
            formatted_duration: duration_s.map(|s| format_duration(s, &self.loc)),
            formatted_distance: distance_m
                .map(|m| format_distance(f64::from(m), self.config.unit_system, &self.loc)),
        })
    }
}
