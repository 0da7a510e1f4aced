//! Measurement formatting.
//!
//! Renders distances, speeds and durations for display with the unit
//! names taken from the `Localizer`.

use serde::{Deserialize, Serialize};

use crate::localization::{keys, Localizer};

const METERS_PER_MILE: f64 = 1609.344;
const METERS_PER_FOOT: f64 = 0.3048;
const METERS_PER_YARD: f64 = 0.9144;
const MPS_TO_KMH: f64 = 3.6;
const MPS_TO_MPH: f64 = 2.236_936;

/// Below a tenth of a mile, imperial distances switch to feet or yards.
const SHORT_IMPERIAL_M: f64 = METERS_PER_MILE / 10.0;

/// Which units distances and speeds are shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    #[default]
    Metric,
    /// Miles and feet.
    ImperialUs,
    /// Miles and yards.
    ImperialUk,
}

/// Format a distance in meters.
pub fn format_distance(meters: f64, units: UnitSystem, loc: &Localizer) -> String {
    let meters = meters.max(0.0);
    match units {
        UnitSystem::Metric => {
            if meters >= 1000.0 {
                loc.format(keys::UNIT_KILOMETERS, &[format!("{:.1}", meters / 1000.0).as_str()])
            } else {
                loc.format(keys::UNIT_METERS, &[round_to_ten(meters).to_string().as_str()])
            }
        }
        UnitSystem::ImperialUs | UnitSystem::ImperialUk if meters >= SHORT_IMPERIAL_M => {
            loc.format(keys::UNIT_MILES, &[format!("{:.1}", meters / METERS_PER_MILE).as_str()])
        }
        UnitSystem::ImperialUs => {
            loc.format(keys::UNIT_FEET, &[round_to_ten(meters / METERS_PER_FOOT).to_string().as_str()])
        }
        UnitSystem::ImperialUk => {
            loc.format(keys::UNIT_YARDS, &[round_to_ten(meters / METERS_PER_YARD).to_string().as_str()])
        }
    }
}

/// Format a speed given in meters per second.
pub fn format_speed(mps: f64, units: UnitSystem, loc: &Localizer) -> String {
    let mps = mps.max(0.0);
    match units {
        UnitSystem::Metric => loc.format(keys::UNIT_KMH, &[((mps * MPS_TO_KMH).round() as i64).to_string().as_str()]),
        UnitSystem::ImperialUs | UnitSystem::ImperialUk => {
            loc.format(keys::UNIT_MPH, &[((mps * MPS_TO_MPH).round() as i64).to_string().as_str()])
        }
    }
}

/// Format a duration in seconds as minutes, or hours and minutes.
pub fn format_duration(seconds: f64, loc: &Localizer) -> String {
    let minutes = (seconds.max(0.0) / 60.0).round() as i64;
    if minutes < 60 {
        loc.format(keys::UNIT_MINUTES, &[minutes.to_string().as_str()])
    } else {
        let hours = (minutes / 60).to_string();
        let rest = (minutes % 60).to_string();
        loc.format(keys::UNIT_HOURS_MINUTES, &[hours.as_str(), rest.as_str()])
    }
}

fn round_to_ten(value: f64) -> i64 {
    (value / 10.0).round() as i64 * 10
}
