//! Controller subsystem for polled joystick and gamepad input
//!
//! Layers, bottom up:
//!
//! 1. [`hid`] - the [`GenericHid`] device seam and a simulated backend
//! 2. [`gamepad_bus`] - gilrs devices behind that seam
//! 3. [`controller`] - [`Controller`] with rise/fall edge toggles per button
//! 4. [`joystick`] / [`xbox`] - fixed layouts, the joystick circularising X/Y
//! 5. [`group`] - several controllers addressed by (controller, index) pairs
//!
//! # Architecture
//!
//! ```text
//! gilrs ──► GamepadBus ──► GilrsHid ──────┐
//!                                          ├─► Controller ──► Joystick / XboxController
//! SimulatedBus ──► SimulatedHid ───────────┘                        │
//!                                                          ControllerGroup
//! ```
//!
//! Everything here is polled from a single thread once per control cycle.

pub mod controller;
pub mod gamepad_bus;
pub mod group;
pub mod hid;
pub mod joystick;
pub mod toggle;
pub mod xbox;

pub use controller::{
    ButtonMap, Controller, ControllerAxis, ControllerButton, HidController, DEFAULT_BUTTON_COUNT,
    MAX_BUTTON_COUNT,
};
pub use gamepad_bus::{GamepadBus, GilrsHid};
pub use group::ControllerGroup;
pub use hid::{GenericHid, HidBackend, HidError, SimulatedBus, SimulatedHid};
pub use joystick::{JoyAxis, Joystick};
pub use toggle::{Toggle, ToggleEvent};
pub use xbox::{XboxAxis, XboxButton, XboxController};
