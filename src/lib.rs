pub mod android_jni;
pub mod config;
pub mod display;
pub mod error;
pub mod guidance;
pub mod identity;
pub mod instruction;
pub mod localization;
pub mod maneuver;
pub mod street;
pub mod units;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
