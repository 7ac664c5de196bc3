use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use super::hid::GenericHid;
use super::toggle::{Toggle, ToggleEvent};

pub const DEFAULT_BUTTON_COUNT: usize = 12;

/// Most buttons a single controller may declare
pub const MAX_BUTTON_COUNT: usize = 32;

/// A button on a controller inside a [`super::ControllerGroup`]
///
/// Controllers are numbered from 1 and buttons from 1. [`ControllerButton::NONE`]
/// stands for "no button" and always reads as released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControllerButton {
    pub controller: i32,
    pub button: i32,
}

impl ControllerButton {
    pub const NONE: Self = Self {
        controller: -1,
        button: -1,
    };

    pub const fn new(controller: i32, button: i32) -> Self {
        Self { controller, button }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl Default for ControllerButton {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for ControllerButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "controller {} button {}", self.controller, self.button)
    }
}

/// Several buttons treated as one input
pub type ButtonMap = Vec<ControllerButton>;

/// An axis on a controller inside a [`super::ControllerGroup`]
///
/// Controllers are numbered from 1, axes from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControllerAxis {
    pub controller: i32,
    pub axis: i32,
}

impl ControllerAxis {
    pub const NONE: Self = Self {
        controller: -1,
        axis: -1,
    };

    pub const fn new(controller: i32, axis: i32) -> Self {
        Self { controller, axis }
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl Default for ControllerAxis {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for ControllerAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "controller {} axis {}", self.controller, self.axis)
    }
}

/// Polled controller surface shared by every controller flavour
///
/// The provided methods describe a plain controller; [`super::Joystick`]
/// replaces the circularisation pair.
pub trait HidController {
    fn button_count(&self) -> usize;

    fn current_port(&self) -> u32;

    fn raw_axis(&self, axis: i32) -> f64;

    fn raw_button(&self, button: i32) -> bool;

    fn axis(&self, axis: i32) -> f64 {
        self.raw_axis(axis)
    }

    fn button(&self, button: i32) -> bool {
        self.raw_button(button)
    }

    /// True on the first poll that sees `button` pressed
    fn button_rise(&mut self, button: i32) -> bool;

    /// True on the first poll that sees `button` released
    fn button_fall(&mut self, button: i32) -> bool;

    fn circularised_axis_against(&self, primary: i32, _compare: i32) -> f64 {
        self.circularised_axis(primary)
    }

    fn circularised_axis(&self, axis: i32) -> f64 {
        self.axis(axis)
    }
}

/// A device plus rise/fall toggles for each of its buttons
#[derive(Debug, Clone)]
pub struct Controller<H: GenericHid> {
    hid: H,
    rise_toggles: Vec<Toggle>,
    fall_toggles: Vec<Toggle>,
}

impl<H: GenericHid> Controller<H> {
    pub fn new(hid: H) -> Self {
        Self::with_buttons(hid, DEFAULT_BUTTON_COUNT)
    }

    pub fn with_buttons(hid: H, button_count: usize) -> Self {
        Self {
            hid,
            rise_toggles: vec![Toggle::new(ToggleEvent::OnRise); button_count],
            fall_toggles: vec![Toggle::new(ToggleEvent::OnFall); button_count],
        }
    }

    pub fn hid(&self) -> &H {
        &self.hid
    }

    pub fn hid_mut(&mut self) -> &mut H {
        &mut self.hid
    }

    fn slot(&self, button: i32) -> Option<usize> {
        let slot = toggle_slot(button, self.rise_toggles.len());
        if slot.is_none() {
            warn!(
                "Button {} out of range for controller on port {} ({} buttons)",
                button,
                self.hid.port(),
                self.rise_toggles.len()
            );
        }
        slot
    }
}

/// Toggle slot of 1-based `button` on a controller with `count` buttons
fn toggle_slot(button: i32, count: usize) -> Option<usize> {
    usize::try_from(button)
        .ok()
        .and_then(|b| b.checked_sub(1))
        .filter(|slot| *slot < count)
}

impl<H: GenericHid> HidController for Controller<H> {
    fn button_count(&self) -> usize {
        self.rise_toggles.len()
    }

    fn current_port(&self) -> u32 {
        self.hid.port()
    }

    fn raw_axis(&self, axis: i32) -> f64 {
        self.hid.raw_axis(axis)
    }

    fn raw_button(&self, button: i32) -> bool {
        self.hid.raw_button(button)
    }

    fn button_rise(&mut self, button: i32) -> bool {
        let pressed = self.button(button);
        match self.slot(button) {
            Some(slot) => self.rise_toggles[slot].update(pressed),
            None => false,
        }
    }

    fn button_fall(&mut self, button: i32) -> bool {
        let pressed = self.button(button);
        match self.slot(button) {
            Some(slot) => self.fall_toggles[slot].update(pressed),
            None => false,
        }
    }
}
