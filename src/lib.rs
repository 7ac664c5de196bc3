//! Edge-detecting joystick and gamepad input for polled robot control loops
//!
//! [`controller`] wraps devices with per-button rise/fall toggles and
//! circularised joystick axes; [`station`] opens the controllers named in a
//! [`config::StationConfig`] and evaluates its bindings once per cycle.

pub mod config;
pub mod controller;
pub mod station;

pub use config::{ConfigError, ControllerKind, ControllerSpec, StationConfig};
pub use station::{ButtonReading, DriverStation, StationError, StationSnapshot};
