//! JNI bindings for the Android app.
//!
//! Each public `Java_*` function here corresponds to an `external fun`
//! declaration in `org.guidancecore.GuidanceBridge`. The function names
//! follow JNI naming conventions: Java_<package>_<class>_<method> with dots replaced by
//! underscores. Data crosses the boundary as JSON strings; the `*_json`
//! functions do the work and can be used without a JVM.

use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;

use crate::config::GuidanceConfig;
use crate::display::ManeuverDisplay;
use crate::error::GuidanceError;
use crate::maneuver::{parse_maneuver, parse_maneuvers};
use crate::street::{current_street, next_street};

/// Display records for every maneuver of a JSON maneuver list, as JSON.
pub fn assemble_json(maneuvers_json: &str, config_json: &str) -> Result<String, GuidanceError> {
    let maneuvers = parse_maneuvers(maneuvers_json)?;
    let config = GuidanceConfig::from_json(config_json)?;
    let loc = config.localizer();

    let records = ManeuverDisplay::new(&maneuvers, &loc)
        .with_lookahead(config.next_street_lookahead_m)
        .assemble_all();
    Ok(serde_json::to_string(&records)?)
}

/// Current street of a JSON maneuver.
pub fn current_street_json(maneuver_json: &str, config_json: &str) -> Result<Option<String>, GuidanceError> {
    let maneuver = parse_maneuver(maneuver_json)?;
    let config = GuidanceConfig::from_json(config_json)?;
    Ok(current_street(&maneuver, &config.localizer()))
}

/// Next street after a JSON maneuver, searching a JSON route.
pub fn next_street_json(
    maneuver_json: &str,
    route_json: &str,
    config_json: &str,
) -> Result<Option<String>, GuidanceError> {
    let maneuver = parse_maneuver(maneuver_json)?;
    let route = parse_maneuvers(route_json)?;
    let config = GuidanceConfig::from_json(config_json)?;
    Ok(next_street(
        Some(&maneuver),
        Some(route.as_slice()),
        None,
        config.next_street_lookahead_m,
        &config.localizer(),
    ))
}

fn read_string(env: &mut JNIEnv, value: &JString) -> Result<String, GuidanceError> {
    Ok(env.get_string(value)?.into())
}

/// Convert a result into a Java string, or `null` on absence or error.
fn respond(env: &mut JNIEnv, result: Result<Option<String>, GuidanceError>) -> jstring {
    let value = match result {
        Ok(Some(value)) => value,
        Ok(None) => return std::ptr::null_mut(),
        Err(e) => {
            log::error!("{e}");
            return std::ptr::null_mut();
        }
    };

    match env.new_string(value) {
        Ok(s) => s.into_raw(),
        Err(e) => {
            log::error!("failed to create Java string: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Sets up logging to logcat. Safe to call more than once.
/// Maps to: GuidanceBridge.init()
#[unsafe(no_mangle)]
pub extern "system" fn Java_org_guidancecore_GuidanceBridge_init(_env: JNIEnv, _class: JClass) {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("guidance-core"),
    );
    log::info!("guidance-core {} initialised", crate::VERSION);
}

/// Returns the library version.
/// Maps to: GuidanceBridge.version() -> String
#[unsafe(no_mangle)]
pub extern "system" fn Java_org_guidancecore_GuidanceBridge_version(
    mut env: JNIEnv,
    _class: JClass,
) -> jstring {
    respond(&mut env, Ok(Some(crate::VERSION.to_string())))
}

/// Maps to: GuidanceBridge.assembleManeuvers(maneuversJson: String, configJson: String) -> String?
#[unsafe(no_mangle)]
pub extern "system" fn Java_org_guidancecore_GuidanceBridge_assembleManeuvers(
    mut env: JNIEnv,
    _class: JClass,
    maneuvers_json: JString,
    config_json: JString,
) -> jstring {
    let result = read_string(&mut env, &maneuvers_json).and_then(|maneuvers| {
        let config = read_string(&mut env, &config_json)?;
        assemble_json(&maneuvers, &config).map(Some)
    });
    respond(&mut env, result)
}

/// Maps to: GuidanceBridge.currentStreet(maneuverJson: String, configJson: String) -> String?
#[unsafe(no_mangle)]
pub extern "system" fn Java_org_guidancecore_GuidanceBridge_currentStreet(
    mut env: JNIEnv,
    _class: JClass,
    maneuver_json: JString,
    config_json: JString,
) -> jstring {
    let result = read_string(&mut env, &maneuver_json).and_then(|maneuver| {
        let config = read_string(&mut env, &config_json)?;
        current_street_json(&maneuver, &config)
    });
    respond(&mut env, result)
}

/// Maps to: GuidanceBridge.nextStreet(maneuverJson: String, routeJson: String, configJson: String) -> String?
#[unsafe(no_mangle)]
pub extern "system" fn Java_org_guidancecore_GuidanceBridge_nextStreet(
    mut env: JNIEnv,
    _class: JClass,
    maneuver_json: JString,
    route_json: JString,
    config_json: JString,
) -> jstring {
    let result = read_string(&mut env, &maneuver_json).and_then(|maneuver| {
        let route = read_string(&mut env, &route_json)?;
        let config = read_string(&mut env, &config_json)?;
        next_street_json(&maneuver, &route, &config)
    });
    respond(&mut env, result)
}
