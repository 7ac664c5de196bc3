//! Dual-stick gamepad in the Xbox layout

use super::controller::{Controller, HidController, DEFAULT_BUTTON_COUNT};
use super::hid::GenericHid;

/// Raw axis indices of an Xbox-layout gamepad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum XboxAxis {
    LeftX = 0,
    LeftY = 1,
    LeftTrigger = 2,
    RightTrigger = 3,
    RightX = 4,
    RightY = 5,
}

impl From<XboxAxis> for i32 {
    fn from(axis: XboxAxis) -> Self {
        axis as i32
    }
}

/// 1-based button numbers of an Xbox-layout gamepad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum XboxButton {
    A = 1,
    B = 2,
    X = 3,
    Y = 4,
    LeftBumper = 5,
    RightBumper = 6,
    Back = 7,
    Start = 8,
    LeftStick = 9,
    RightStick = 10,
}

impl From<XboxButton> for i32 {
    fn from(button: XboxButton) -> Self {
        button as i32
    }
}

pub struct XboxController<H: GenericHid> {
    inner: Controller<H>,
}

impl<H: GenericHid> XboxController<H> {
    pub fn new(hid: H) -> Self {
        Self::with_buttons(hid, DEFAULT_BUTTON_COUNT)
    }

    pub fn with_buttons(hid: H, button_count: usize) -> Self {
        Self {
            inner: Controller::with_buttons(hid, button_count),
        }
    }

    pub fn hid(&self) -> &H {
        self.inner.hid()
    }
}

impl<H: GenericHid> HidController for XboxController<H> {
    fn button_count(&self) -> usize {
        self.inner.button_count()
    }

    fn current_port(&self) -> u32 {
        self.inner.current_port()
    }

    fn raw_axis(&self, axis: i32) -> f64 {
        self.inner.raw_axis(axis)
    }

    fn raw_button(&self, button: i32) -> bool {
        self.inner.raw_button(button)
    }

    fn button_rise(&mut self, button: i32) -> bool {
        self.inner.button_rise(button)
    }

    fn button_fall(&mut self, button: i32) -> bool {
        self.inner.button_fall(button)
    }
}
